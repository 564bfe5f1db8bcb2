//! Converter configuration from html2docx.toml

use crate::document::PageMargins;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "html2docx.toml";

/// Converter configuration
///
/// Every key is optional in the TOML file; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Page margin on all four sides, in inches
    pub margin_inches: f64,

    /// Extension of the written document, without the dot
    pub output_extension: String,

    /// Remove the HTML source after a successful conversion
    pub delete_source: bool,

    /// Optional file that log lines are appended to (besides the console)
    pub log_file: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            margin_inches: 0.2,
            output_extension: "docx".to_string(),
            delete_source: true,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ConverterConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: ConverterConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `html2docx.toml` from the working
    /// directory if it exists, else the defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE_NAME).is_file() => Self::load(CONFIG_FILE_NAME),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a TOML file
    ///
    /// # Parameters
    /// * `path` - Path where the configuration file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(ConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        fs::write(&path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Page margins for new documents
    pub fn margins(&self) -> PageMargins {
        PageMargins::uniform(self.margin_inches)
    }

    /// Log level as a filter
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level.clone(),
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.margin_inches.is_finite() && self.margin_inches >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "margin_inches",
                value: self.margin_inches.to_string(),
            });
        }
        if self.output_extension.is_empty() || self.output_extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "output_extension",
                value: self.output_extension.clone(),
            });
        }
        self.level_filter()?;
        Ok(())
    }
}

/// Errors that can occur when loading or saving the configuration
#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    IoError(std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    SerializeError(toml::ser::Error),

    /// A key holds a value outside its domain
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Configuration key
        key: &'static str,
        /// Offending value
        value: String,
    },
}
