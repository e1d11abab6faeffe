//! JSON key-value storage with an in-memory fallback.
//!
//! [`LocalStorage`] stores any `serde` value as JSON text in a persistent
//! host facility. If that facility is absent, or fails a write/remove probe
//! when the facade is built, an in-process [`VolatileStore`] takes its place
//! for the lifetime of the instance. Engine failures never escape the
//! facade: writes report `bool`, reads report `Option`.
//!
//! # Quick Start
//!
//! ```ignore
//! use local_kv::prelude::*;
//!
//! let mut storage = LocalStorage::open(&StorageConfig::at(".local-kv"));
//!
//! storage.set("theme", "dark");
//! storage.set("recent", &vec![1, 2, 3]);
//!
//! let theme: Option<String> = storage.get("theme");
//! let recent: Vec<u32> = storage.get_or("recent", Vec::new());
//! ```
//!
//! # Modules
//!
//! - [`engine`] - The [`StorageEngine`] contract and the bundled engines
//! - [`storage`] - The [`LocalStorage`] facade
//! - [`config`] - Where the host facility lives
//!
//! # Feature Flags
//!
//! - `disk` - Enable the fjall-backed [`DiskStore`] (enabled by default)
//! - `config` - Enable loading [`Config`] from TOML files
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

pub mod config;
pub mod engine;
mod logging;
pub mod prelude;
pub mod storage;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use config::{Config, ConfigError, LogFormat, LoggingConfig, StorageConfig};
#[cfg(feature = "disk")]
pub use engine::DiskStore;
pub use engine::{EngineError, EngineKind, StorageEngine, VolatileStore};
pub use storage::LocalStorage;
