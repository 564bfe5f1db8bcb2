//! html2docx - HTML to Word document converter
//!
//! A CLI tool that converts HTML files (or folders of them) into `.docx`
//! documents placed beside each source.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use html2docx::{is_html_file, Converter, ConverterConfig, LoggingContext};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Name of the sample file written by `selftest`
const SELFTEST_FILE_NAME: &str = "standalone_test.html";

/// Sample document covering every mapped element kind
const SELFTEST_HTML: &str = r#"<html>
<head><title>Standalone Test</title></head>
<body>
    <h1>Converter Self-Test</h1>
    <p>This is a <strong>bold</strong> and <em>italic</em> paragraph.</p>
    <ul>
        <li>First item</li>
        <li>Second item</li>
    </ul>
    <table>
        <tr><th>Name</th><th>Value</th></tr>
        <tr><td>alpha</td><td>1</td></tr>
    </table>
</body>
</html>
"#;

/// Main entry point for the html2docx CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConverterConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        config.level_filter()?
    };
    if let Commands::Convert {
        keep_source: true, ..
    } = cli.command
    {
        config.delete_source = false;
    }

    let log_file = config.log_file.clone();
    let converter = Converter::new(config, LoggingContext::new(level, log_file));
    converter
        .logging()
        .install()
        .context("Failed to open log file")?;

    match cli.command {
        Commands::Convert { paths, .. } => {
            handle_convert_command(&converter, &paths)?;
        }

        Commands::Selftest { dir } => {
            handle_selftest_command(&converter, &dir)?;
        }
    }

    Ok(())
}

/// Handle the convert command
fn handle_convert_command(converter: &Converter, paths: &[PathBuf]) -> Result<()> {
    let targets = collect_targets(paths);
    if targets.is_empty() {
        println!("No HTML files to convert");
        return Ok(());
    }

    println!("Converting {} file(s)...", targets.len());

    #[cfg(feature = "parallel")]
    let failures: Vec<&PathBuf> = targets
        .par_iter()
        .filter(|path| !converter.convert(path))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let failures: Vec<&PathBuf> = targets
        .iter()
        .filter(|path| !converter.convert(path))
        .collect();

    let converted = targets.len() - failures.len();
    println!("✓ Converted {} of {} file(s)", converted, targets.len());

    if !failures.is_empty() {
        anyhow::bail!(
            "{} conversion(s) failed: {}",
            failures.len(),
            failures.iter().map(|path| path.display()).join(", ")
        );
    }

    Ok(())
}

/// Expand folders one level deep and keep only `.html` files
fn collect_targets(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut targets = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file() && is_html_file(entry.path()))
                .map(|entry| absolute(entry.path()));
            targets.extend(found);
        } else if is_html_file(path) {
            targets.push(absolute(path));
        } else {
            log::warn!("Skipping non-HTML path: {}", path.display());
        }
    }

    targets.into_iter().unique().collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Handle the selftest command
///
/// Writes a sample HTML file into `dir`, converts it and checks that the
/// document exists and the source was removed.
fn handle_selftest_command(converter: &Converter, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let source = absolute(&dir.join(SELFTEST_FILE_NAME));
    fs::write(&source, SELFTEST_HTML)
        .with_context(|| format!("Failed to write sample file: {}", source.display()))?;
    println!("Created sample file: {}", source.display());

    if !converter.convert(&source) {
        anyhow::bail!("Conversion of {} failed", source.display());
    }
    println!("✓ Conversion reported success");

    let output = converter.output_path(&source);
    if output.is_file() {
        println!("✓ Document created: {}", output.display());
    } else {
        println!("✗ Document missing: {}", output.display());
        anyhow::bail!("Self-test failed: no document was written");
    }

    if converter.config().delete_source {
        if source.exists() {
            println!("✗ Source file still present: {}", source.display());
            anyhow::bail!("Self-test failed: source file was not removed");
        }
        println!("✓ Source file removed");
    }

    println!("\n✓ Self-test passed");
    Ok(())
}
