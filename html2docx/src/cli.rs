//! Command-line interface definitions for html2docx

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the html2docx application
#[derive(Parser)]
#[command(name = "html2docx")]
#[command(version)]
#[command(about = "Convert HTML files into Word documents", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./html2docx.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for html2docx
#[derive(Subcommand)]
pub enum Commands {
    /// Convert HTML files (or every .html file in the given folders)
    Convert {
        /// Files or folders to convert
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Keep the HTML source after a successful conversion
        #[arg(long)]
        keep_source: bool,
    },

    /// Convert a generated sample file and check the result
    Selftest {
        /// Folder the sample file is written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}
