//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

use crate::export::{ExportFormat, ExportOptions, DOCUMENT_TITLE, SHEET_NAME};
use crate::event::EVENT;
use crate::stats::DEFAULT_TARGET;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote invite directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    "http://localhost:3000".to_string()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: None,
        }
    }
}

/// The event being registered for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_event_name")]
    pub name: String,

    /// Expected attendance; must be positive
    #[serde(default = "default_target")]
    pub target: u32,
}

fn default_event_name() -> String {
    EVENT.name.to_string()
}

fn default_target() -> u32 {
    DEFAULT_TARGET
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: default_event_name(),
            target: default_target(),
        }
    }
}

/// Export file names and headings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_spreadsheet_file")]
    pub spreadsheet_file: String,

    #[serde(default = "default_document_file")]
    pub document_file: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_document_title")]
    pub document_title: String,
}

fn default_spreadsheet_file() -> String {
    ExportFormat::Xlsx.file_name().to_string()
}

fn default_document_file() -> String {
    ExportFormat::Pdf.file_name().to_string()
}

fn default_sheet_name() -> String {
    SHEET_NAME.to_string()
}

fn default_document_title() -> String {
    DOCUMENT_TITLE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            spreadsheet_file: default_spreadsheet_file(),
            document_file: default_document_file(),
            sheet_name: default_sheet_name(),
            document_title: default_document_title(),
        }
    }
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.sheet_name.clone(),
            document_title: self.document_title.clone(),
        }
    }

    /// Output file name for `format`
    pub fn file_name(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Xlsx => &self.spreadsheet_file,
            ExportFormat::Pdf => &self.document_file,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Reject values that would break the statistics
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event.target == 0 {
            return Err(ConfigError::Invalid(
                "event.target must be greater than zero".to_string(),
            ));
        }
        if self.directory.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "directory.api_base must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, source) = Self::discover();
        source.log();
        config
    }

    /// Load from default locations without logging
    ///
    /// Returns where the config came from so the caller can report it once
    /// logging is set up.
    pub fn discover() -> (Self, ConfigSource) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("convite").join("config.toml")),
            Some(PathBuf::from("/etc/convite/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file of `paths` that parses
    fn load_first(paths: &[PathBuf]) -> (Self, ConfigSource) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    let source = ConfigSource {
                        loaded: Some(path.clone()),
                        skipped,
                    };
                    return (config, source);
                }
                Err(e) => skipped.push((path.clone(), e)),
            }
        }

        let source = ConfigSource {
            loaded: None,
            skipped,
        };
        (Self::from_env(), source)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(api_base) = std::env::var("CONVITE_API_BASE") {
            self.directory.api_base = api_base;
        }

        if let Ok(level) = std::env::var("CONVITE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CONVITE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where [`Config::discover`] found its settings
#[cfg(feature = "native")]
#[derive(Debug)]
pub struct ConfigSource {
    /// File the config was read from; `None` means defaults plus environment
    pub loaded: Option<PathBuf>,
    /// Files that existed but failed to load, in search order
    pub skipped: Vec<(PathBuf, ConfigError)>,
}

#[cfg(feature = "native")]
impl ConfigSource {
    pub fn log(&self) {
        for (path, e) in &self.skipped {
            tracing::warn!("Failed to load config from {:?}: {}", path, e);
        }

        match &self.loaded {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "native")]
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[cfg(feature = "native")]
    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Convite Configuration
#
# Environment variables override these settings:
# - CONVITE_API_BASE
# - CONVITE_LOG_LEVEL
# - CONVITE_LOG_FORMAT

[directory]
# Base URL of the invite directory
api_base = "http://localhost:3000"

# Request timeout in seconds (no timeout when unset)
# request_timeout_secs = 30

[event]
# Event name shown in reports
name = "Mega Evento MCB"

# Expected attendance, must be greater than zero
target = 1000

[export]
# Output file names
spreadsheet_file = "participantes-mcb.xlsx"
document_file = "participantes-mcb.pdf"

# Worksheet name and document heading
sheet_name = "Participantes"
document_title = "Lista de Participantes - MCB"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
