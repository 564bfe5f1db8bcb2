//! Logging context
//!
//! Log lines look like `2026-01-02T03:04:05Z - INFO - message` and go to the
//! console and, optionally, to a log file. The context is built explicitly
//! and handed to the converter. Installing it is idempotent: the `log` facade
//! accepts one logger per process, so a second context finds the first one
//! installed and leaves it alone instead of adding another set of outputs.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Logging configuration for one process
#[derive(Debug, Clone)]
pub struct LoggingContext {
    level: log::LevelFilter,
    log_file: Option<PathBuf>,
}

impl LoggingContext {
    /// Create a context logging at `level`, optionally also into `log_file`
    pub fn new(level: log::LevelFilter, log_file: Option<PathBuf>) -> Self {
        Self { level, log_file }
    }

    /// Console-only context
    pub fn console(level: log::LevelFilter) -> Self {
        Self::new(level, None)
    }

    /// Install the logger
    ///
    /// # Returns
    /// * `Ok(true)` - This context's logger is now active
    /// * `Ok(false)` - A logger was already installed; nothing changed
    /// * `Err(io::Error)` - The log file could not be opened
    pub fn install(&self) -> io::Result<bool> {
        let file = match &self.log_file {
            Some(path) => Some(open_log_file(path)?),
            None => None,
        };

        let installed = env_logger::Builder::new()
            .filter_level(self.level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {}",
                    buf.timestamp(),
                    record.level(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
            .try_init()
            .is_ok();

        Ok(installed)
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::console(log::LevelFilter::Info)
    }
}

/// Open `path` for appending, creating its parent folders
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Writes every log line to stderr and, when present, to the log file
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}
