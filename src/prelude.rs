//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use local_kv::prelude::*;
//!
//! let mut storage = LocalStorage::volatile();
//! storage.set("count", &3);
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Facade and configuration
pub use crate::config::{Config, StorageConfig};
pub use crate::storage::LocalStorage;

// Engines
#[cfg(feature = "disk")]
pub use crate::engine::DiskStore;
pub use crate::engine::{EngineError, EngineKind, StorageEngine, VolatileStore};
