//! Configuration for locating the host facility.
//!
//! A [`StorageConfig`] can be built in code or, with the `config` feature,
//! loaded from a TOML file:
//!
//! ```toml
//! [storage]
//! path = ".local-kv"
//! keyspace = "local-storage"
//! sync_on_write = true
//!
//! [logging]
//! level = "warn"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default directory for the persistent store.
pub const DEFAULT_PATH: &str = ".local-kv";

/// Default keyspace inside the persistent store.
pub const DEFAULT_KEYSPACE: &str = "local-storage";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how entries are persisted.
    pub storage: StorageConfig,
    /// Log output settings (used by the CLI).
    pub logging: LoggingConfig,
}

/// Host facility settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the persistent store. `None` or an empty path means
    /// there is no host facility and the in-memory engine is used.
    pub path: Option<PathBuf>,
    /// Keyspace holding the entries.
    pub keyspace: String,
    /// Flush to disk after every mutation.
    pub sync_on_write: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_PATH)),
            keyspace: DEFAULT_KEYSPACE.to_string(),
            sync_on_write: true,
        }
    }
}

impl StorageConfig {
    /// Configuration with no host facility.
    pub fn volatile() -> Self {
        Self {
            path: None,
            ..Self::default()
        }
    }

    /// Configuration for a persistent store at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Directory of the host facility, if one is configured.
    pub fn host_path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"warn"` or `"local_kv=debug"`.
    pub level: String,
    pub format: LogFormat,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            timestamps: false,
        }
    }
}

#[cfg(feature = "config")]
impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[cfg(feature = "config")]
    #[error("Failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}
