//! Unified error type for the local-kv library.
//!
//! The [`LocalStorage`](crate::LocalStorage) facade never returns errors; this
//! type is for the paths that do propagate them: opening engines directly,
//! loading configuration, and the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;

/// Unified error type for all local-kv operations.
///
/// # Example
///
/// ```ignore
/// use local_kv::{Config, Result};
///
/// fn load() -> Result<Config> {
///     Ok(Config::from_file("local-kv.toml")?)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from a storage engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Error loading configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Value could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a storage engine error.
    pub fn is_engine(&self) -> bool {
        matches!(self, Self::Engine(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is a JSON error.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let err: Error = EngineError::WriteRejected("disk full".to_string()).into();
        assert!(err.is_engine());
        assert_eq!(err.to_string(), "Write rejected: disk full");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_json());
        assert!(!err.is_config());
    }
}
