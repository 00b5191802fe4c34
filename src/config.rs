//! Configuration file support for DropDown.
//!
//! The config is an optional JSON file. Every field has a default, so a file
//! only needs the settings it changes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dropdown_ui::constants::COMMIT_DELAY;
use dropdown_ui::Spring;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_LIST_WIDTH, DEFAULT_OPTIONS,
    DEFAULT_SELECTION,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    pub log_level: LogLevel,

    /// Slide the list to the selection instead of pinning it first
    pub dynamic: bool,

    /// List width in logical pixels
    pub width: f32,

    /// Option labels, in display order
    pub options: Vec<String>,

    /// Initially selected label
    pub selection: String,

    /// Expand/collapse spring
    pub spring: Spring,

    /// Delay before a static list writes its selection
    pub commit_delay_ms: u64,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            dynamic: false,
            width: DEFAULT_LIST_WIDTH,
            options: DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
            selection: DEFAULT_SELECTION.to_string(),
            spring: Spring::interactive(),
            commit_delay_ms: COMMIT_DELAY.as_millis() as u64,
        }
    }

    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.normalize();
        Ok(config)
    }

    /// Replace values the list cannot display with defaults. A selection
    /// that is not one of the options is kept; the list shows it as the
    /// first row.
    fn normalize(&mut self) {
        if self.options.is_empty() {
            log::warn!("Config has no options, using the defaults");
            self.options = DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect();
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            log::warn!("Invalid list width {}, using {}", self.width, DEFAULT_LIST_WIDTH);
            self.width = DEFAULT_LIST_WIDTH;
        }
        if !self.spring.is_valid() {
            log::warn!("Invalid spring {:?}, using the default", self.spring);
            self.spring = Spring::interactive();
        }
    }

    /// Config path: `$DROPDOWN_CONFIG` if set, otherwise
    /// `<config dir>/dropdown/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        resolve_path(std::env::var_os(CONFIG_PATH_ENV), dirs::config_dir())
    }

    /// Load the configuration from [`AppConfig::default_path`].
    /// A missing file is not an error and yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::debug!("No config file found at {:?}", path);
                Ok(Self::new())
            }
            None => Ok(Self::new()),
        }
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_path(env_override: Option<OsString>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    match env_override {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir.map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
