//! Conversion orchestration
//!
//! One call to [`Converter::convert`] turns one HTML file into a `.docx`
//! beside it and removes the source:
//! 1. **Read**: load the file as UTF-8
//! 2. **Map**: parse the markup and map it into an [`OutputDocument`]
//! 3. **Save**: write the package atomically, then delete the source
//!
//! Every call builds its own parser state and document; a `Converter` holds
//! only read-only configuration and can be shared between threads.

use crate::config::ConverterConfig;
use crate::docx_exporter::{self, ExportError};
use crate::document::{OutputDocument, Paragraph, ParagraphKind};
use crate::html::HtmlDocument;
use crate::logging::LoggingContext;
use crate::mapper::Mapper;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Converts HTML files into DOCX documents
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
    logging: LoggingContext,
}

/// Summary of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// The HTML file that was converted
    pub input: PathBuf,
    /// The document that was written
    pub output: PathBuf,
    /// Number of blocks in the document
    pub blocks: usize,
    /// Number of tables in the document
    pub tables: usize,
    /// Number of words in the document
    pub words: usize,
    /// Rules found in `<style>` blocks (parsed, not applied)
    pub stylesheet_rules: usize,
    /// Whether the source file was deleted
    pub source_removed: bool,
}

impl Converter {
    /// Create a converter from a configuration and a logging context
    pub fn new(config: ConverterConfig, logging: LoggingContext) -> Self {
        Self { config, logging }
    }

    /// The active configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The logging context this converter reports through
    ///
    /// The binary installs the logger through this handle, so the converter
    /// and the process share one context.
    pub fn logging(&self) -> &LoggingContext {
        &self.logging
    }

    /// Path of the document written for `input`: same folder, same stem
    pub fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension(&self.config.output_extension)
    }

    /// Convert one HTML file, reporting success as a boolean
    ///
    /// Never panics and never returns an error: every failure is logged with
    /// the path and reported as `false`. On success the document exists and
    /// the source is gone (unless `delete_source` is off).
    pub fn convert(&self, path: &Path) -> bool {
        match self.try_convert(path) {
            Ok(report) => {
                log::info!(
                    "Converted {}: {} blocks, {} tables, {} stylesheet rules, {} words",
                    report.input.display(),
                    report.blocks,
                    report.tables,
                    report.stylesheet_rules,
                    report.words
                );
                true
            }
            Err(e) => {
                log::error!("Error converting {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Convert one HTML file
    ///
    /// # Parameters
    /// * `path` - The HTML file to convert
    ///
    /// # Returns
    /// * `Ok(ConversionReport)` - The document was written (and the source removed)
    /// * `Err(ConvertError)` - Reading, writing or deleting failed
    pub fn try_convert(&self, path: &Path) -> Result<ConversionReport, ConvertError> {
        let output = self.output_path(path);
        if output == path {
            return Err(ConvertError::SameOutputPath(path.to_path_buf()));
        }

        let markup =
            fs::read_to_string(path).map_err(|e| ConvertError::Read(path.to_path_buf(), e))?;

        let html = HtmlDocument::parse(&markup);
        let stylesheet_rules = html.stylesheet().len();
        if stylesheet_rules > 0 {
            log::debug!(
                "Found {} stylesheet rules in {}; only inline styles are applied",
                stylesheet_rules,
                path.display()
            );
        }
        let document = self.build_document(&html);

        save_atomically(&document, &output)?;
        log::info!(
            "Successfully converted {} to {}",
            file_name(path),
            file_name(&output)
        );

        if self.config.delete_source {
            fs::remove_file(path).map_err(|e| ConvertError::Delete(path.to_path_buf(), e))?;
            log::info!("Removed original HTML file: {}", file_name(path));
        }

        Ok(ConversionReport {
            input: path.to_path_buf(),
            output,
            blocks: document.blocks.len(),
            tables: document.table_count(),
            words: document.word_count(),
            stylesheet_rules,
            source_removed: self.config.delete_source,
        })
    }

    /// Map markup into a document without touching the filesystem
    pub fn render(&self, markup: &str) -> OutputDocument {
        self.build_document(&HtmlDocument::parse(markup))
    }

    fn build_document(&self, html: &HtmlDocument) -> OutputDocument {
        let mut document = OutputDocument::new(self.config.margins());

        if let Some(title) = html.title() {
            document.add_paragraph(Paragraph::with_text(ParagraphKind::Title, title.trim()));
        }

        {
            let mut mapper = Mapper::new(&mut document);
            match html.body() {
                Some(body) => mapper.map_children(body),
                None => mapper.map_children(html.root()),
            }
        }

        document
    }
}

/// Write the package to a temporary file beside `output`, then rename it
/// into place so a failed save never leaves a partial document
fn save_atomically(document: &OutputDocument, output: &Path) -> Result<(), ConvertError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".html2docx-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| ConvertError::Write(output.to_path_buf(), e))?;

    docx_exporter::write_docx(document, temp.as_file_mut())
        .map_err(|e| ConvertError::Export(output.to_path_buf(), e))?;

    temp.persist(output)
        .map_err(|e| ConvertError::Write(output.to_path_buf(), e.error))?;
    Ok(())
}

/// Whether `path` names an HTML file (`.html`, any case)
pub fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Errors that can occur while converting one file
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source could not be read as UTF-8 text
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    /// The configured extension maps the input onto itself
    #[error("Output path would overwrite the input: {}", .0.display())]
    SameOutputPath(PathBuf),

    /// The document file could not be created or moved into place
    #[error("Failed to write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    /// The package could not be serialized
    #[error("Failed to export {}: {}", .0.display(), .1)]
    Export(PathBuf, #[source] ExportError),

    /// The document was written but the source could not be removed
    #[error("Failed to delete {}: {}", .0.display(), .1)]
    Delete(PathBuf, #[source] std::io::Error),
}
