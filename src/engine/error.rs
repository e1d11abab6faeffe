//! Error types for storage engines.

use thiserror::Error;

/// Errors raised by a [`StorageEngine`](super::StorageEngine).
///
/// None of these escape the facade: write-side errors become `false`,
/// read-side errors become a miss, and `Unavailable` selects the volatile
/// engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Storage engine unavailable: {0}")]
    Unavailable(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Stored value is not valid text: {0}")]
    Corrupt(String),
}

impl EngineError {
    /// Returns `true` if the engine refused a mutation.
    pub fn is_write_rejected(&self) -> bool {
        matches!(self, Self::WriteRejected(_))
    }

    /// Returns `true` if a write was attempted without a value.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
