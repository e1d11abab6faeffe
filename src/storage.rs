//! JSON key-value facade over a storage engine.
//!
//! [`LocalStorage`] picks its engine once, at construction: the host facility
//! if it survives a write/remove probe, otherwise an in-process
//! [`VolatileStore`]. Values cross the facade as JSON text, and every engine
//! failure is absorbed here, so callers only ever see `bool` results and
//! `Option` misses.

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "disk")]
use crate::config::StorageConfig;
#[cfg(feature = "disk")]
use crate::engine::DiskStore;
use crate::engine::{EngineError, EngineKind, StorageEngine, VolatileStore};
use crate::logging::{debug, info, warn};

/// Upper bound (inclusive) of the number embedded in probe keys.
const PROBE_KEY_RANGE: u32 = 10_000_000;

/// Candidate keys drawn before giving up on finding one that is not in use.
const SCRATCH_KEY_ATTEMPTS: usize = 16;

enum ActiveEngine {
    Persistent(Box<dyn StorageEngine>),
    Volatile(VolatileStore),
}

impl ActiveEngine {
    fn kind(&self) -> EngineKind {
        match self {
            Self::Persistent(_) => EngineKind::Persistent,
            Self::Volatile(_) => EngineKind::Volatile,
        }
    }

    fn as_engine(&self) -> &dyn StorageEngine {
        match self {
            Self::Persistent(host) => &**host,
            Self::Volatile(store) => store,
        }
    }

    fn as_engine_mut(&mut self) -> &mut dyn StorageEngine {
        match self {
            Self::Persistent(host) => &mut **host,
            Self::Volatile(store) => store,
        }
    }
}

/// Typed key-value storage with an in-memory fallback.
///
/// ```ignore
/// use local_kv::LocalStorage;
///
/// let mut storage = LocalStorage::new();
/// storage.set("volume", &0.8);
/// let volume: f64 = storage.get_or("volume", 1.0);
/// ```
pub struct LocalStorage {
    engine: ActiveEngine,
}

impl LocalStorage {
    /// Open the default on-disk store, falling back to memory if it is
    /// unusable.
    #[cfg(feature = "disk")]
    pub fn new() -> Self {
        Self::open(&StorageConfig::default())
    }

    /// In-memory storage; the `disk` feature is disabled so there is no host
    /// facility to try.
    #[cfg(not(feature = "disk"))]
    pub fn new() -> Self {
        Self::volatile()
    }

    /// Storage that never touches a host facility.
    pub fn volatile() -> Self {
        Self {
            engine: ActiveEngine::Volatile(VolatileStore::new()),
        }
    }

    /// Use `host` as the persistent facility if it passes the usability
    /// probe. `None` means the facility is absent.
    ///
    /// The probe writes an empty value under a random `__<n>__` key that
    /// the host does not already hold, and removes it again. Existing entries
    /// are never overwritten. It runs exactly once; a facility that fails it is
    /// never retried for the lifetime of this instance.
    pub fn with_host(host: Option<Box<dyn StorageEngine>>) -> Self {
        let Some(mut host) = host else {
            info!("no host facility, using volatile store");
            return Self::volatile();
        };

        match probe(&mut *host, probe_key) {
            Ok(()) => {
                info!("host facility passed probe");
                Self {
                    engine: ActiveEngine::Persistent(host),
                }
            }
            Err(err) => {
                warn!(error = %err, "host facility failed probe, using volatile store");
                Self::volatile()
            }
        }
    }

    /// Open the on-disk store described by `config` as the host facility.
    ///
    /// A missing path or a store that cannot be opened counts as an absent
    /// facility.
    #[cfg(feature = "disk")]
    pub fn open(config: &StorageConfig) -> Self {
        let host = config.host_path().and_then(|path| {
            match DiskStore::open(path, &config.keyspace, config.sync_on_write) {
                Ok(store) => Some(Box::new(store) as Box<dyn StorageEngine>),
                Err(err) => {
                    warn!(error = %err, "could not open disk store");
                    None
                }
            }
        });

        Self::with_host(host)
    }

    /// Which engine was selected at construction.
    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    /// Number of stored entries. An engine that cannot count reads as empty.
    pub fn len(&self) -> usize {
        match self.engine.as_engine().count() {
            Ok(count) => count,
            Err(err) => {
                warn!(error = %err, "engine count failed");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry. Returns `false` if the engine failed.
    pub fn clear(&mut self) -> bool {
        self.mutate("clear", None, |engine| engine.clear())
    }

    /// Value stored under `key`.
    ///
    /// Returns `None` when the key is missing, its text is empty or not valid
    /// JSON, it holds JSON `null`, or it does not deserialize into `T`.
    ///
    /// A top-level `null` is a miss for every `T`, including types that
    /// could decode it: `get::<Option<i32>>` yields `None` rather than
    /// `Some(None)`, and `get::<()>` yields `None`. Nested `null`s decode
    /// normally.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.engine.as_engine().get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(err) => {
                warn!(key, error = %err, "engine read failed, treating as missing");
                return None;
            }
        };

        decode(key, &raw)
    }

    /// Like [`get`](Self::get), with `default` standing in for every case
    /// where `get` returns `None`, a stored top-level `null` included.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Store `value` as JSON under `key`. Returns `false` if the value cannot
    /// be encoded or the engine rejected the write.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(err) => {
                warn!(key, error = %err, "value is not representable as JSON");
                return false;
            }
        };

        self.mutate("set", Some(key), |engine| engine.set_item(key, Some(text.as_str())))
    }

    /// Delete `key`. Deleting a missing key succeeds; returns `false` only if
    /// the engine failed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.mutate("remove", Some(key), |engine| engine.remove_item(key))
    }

    /// Run a mutation against the active engine, absorbing its error.
    fn mutate<F>(&mut self, op: &'static str, key: Option<&str>, f: F) -> bool
    where
        F: FnOnce(&mut dyn StorageEngine) -> Result<(), EngineError>,
    {
        match f(self.engine.as_engine_mut()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    op,
                    key,
                    engine = %self.engine.kind(),
                    error = %err,
                    "engine error absorbed"
                );
                false
            }
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("engine", &self.engine.kind())
            .finish()
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(key, error = %err, "stored text is not JSON");
            return None;
        }
    };

    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            debug!(key, error = %err, "stored JSON does not match requested type");
            None
        }
    }
}

fn probe<K>(engine: &mut dyn StorageEngine, mut next_key: K) -> Result<(), EngineError>
where
    K: FnMut() -> String,
{
    let mut free = None;
    for _ in 0..SCRATCH_KEY_ATTEMPTS {
        let key = next_key();
        if engine.get_item(&key)?.is_none() {
            free = Some(key);
            break;
        }
        debug!(key = %key, "scratch key already in use");
    }

    let key = free.ok_or_else(|| {
        EngineError::Unavailable(format!(
            "no unused scratch key after {SCRATCH_KEY_ATTEMPTS} attempts"
        ))
    })?;
    engine.set_item(&key, Some(""))?;
    engine.remove_item(&key)
}

fn probe_key() -> String {
    let n = rand::thread_rng().gen_range(0..=PROBE_KEY_RANGE);
    format!("__{n}__")
}
