//! html2docx - HTML to Word document conversion
//!
//! Converts an HTML file into a `.docx` document beside it, translating
//! headings, paragraphs with inline formatting, lists, tables and a subset of
//! inline CSS into Word paragraph and run formatting, then removes the source.
//!
//! ```rust,no_run
//! use html2docx::{Converter, ConverterConfig, LoggingContext};
//! use std::path::Path;
//!
//! let converter = Converter::new(ConverterConfig::default(), LoggingContext::default());
//! if !converter.convert(Path::new("/home/me/Downloads/page.html")) {
//!     eprintln!("conversion failed; see the log");
//! }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod config;
pub mod converter;
pub mod css;
pub mod docx_exporter;
pub mod document;
pub mod html;
pub mod logging;
pub mod mapper;
pub mod style;

pub use config::{ConfigError, ConverterConfig};
pub use converter::{is_html_file, ConversionReport, ConvertError, Converter};
pub use document::OutputDocument;
pub use logging::LoggingContext;
