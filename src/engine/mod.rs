//! Storage engines behind the [`LocalStorage`](crate::LocalStorage) facade.
//!
//! An engine is a flat string-to-string store. The facade only ever talks to
//! it through [`StorageEngine`], so any backing store that can count, clear,
//! read, write and delete text entries can be plugged in as the host
//! facility.
//!
//! Two engines ship with the crate:
//!
//! - [`VolatileStore`] - in-process map, used when no host facility is usable
//! - [`DiskStore`] - directory-backed store on fjall (requires `disk` feature)

#[cfg(feature = "disk")]
mod disk;
mod error;
mod volatile;

#[cfg(feature = "disk")]
pub use disk::DiskStore;
pub use error::EngineError;
pub use volatile::VolatileStore;

/// Capability set every backing store must provide.
///
/// Keys are unique within an engine and the last write wins. No ordering is
/// implied between entries.
pub trait StorageEngine {
    /// Number of entries currently stored. Must not mutate the engine.
    fn count(&self) -> Result<usize, EngineError>;

    /// Remove every entry. Clearing an empty engine succeeds.
    fn clear(&mut self) -> Result<(), EngineError>;

    /// Raw text stored under `key`, or `None` if the key is unknown.
    fn get_item(&self, key: &str) -> Result<Option<String>, EngineError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// `None` stands for a write whose value is missing and must fail with
    /// [`EngineError::InvalidArgument`]. `Some("")` is a present value.
    fn set_item(&mut self, key: &str, value: Option<&str>) -> Result<(), EngineError>;

    /// Delete the entry for `key`. Deleting an unknown key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), EngineError>;
}

/// Which kind of engine a facade ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// The host facility passed its probe.
    Persistent,
    /// The host facility was absent or unusable.
    Volatile,
}

impl EngineKind {
    /// Lowercase name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::Volatile => "volatile",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn missing_value(op: &str) -> EngineError {
    EngineError::InvalidArgument(format!(
        "failed to execute '{op}': 2 arguments required, but only 1 present"
    ))
}
