//! Persistent host facility backed by fjall.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use super::{EngineError, StorageEngine, missing_value};
use crate::logging::{debug, info};

/// fjall stores key lengths as `u16` and rejects empty keys.
const MAX_KEY_LEN: usize = u16::MAX as usize;

fn storable(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_LEN
}

/// Directory-backed string store.
///
/// All entries live in a single fjall keyspace. Values are stored as UTF-8
/// bytes; anything else read back is reported as [`EngineError::Corrupt`].
pub struct DiskStore {
    db: fjall::Database,
    keyspace: Keyspace,
    sync_on_write: bool,
}

impl DiskStore {
    /// Open (or create) a store at `path` using the keyspace `name`.
    ///
    /// Any failure to open the database is reported as
    /// [`EngineError::Unavailable`].
    pub fn open(path: &Path, name: &str, sync_on_write: bool) -> Result<Self, EngineError> {
        let unavailable =
            |e: fjall::Error| EngineError::Unavailable(format!("{}: {}", path.display(), e));

        let db = fjall::Database::builder(path).open().map_err(unavailable)?;
        let keyspace = db
            .keyspace(name, KeyspaceCreateOptions::default)
            .map_err(unavailable)?;

        info!(path = %path.display(), keyspace = name, "opened disk store");

        Ok(Self {
            db,
            keyspace,
            sync_on_write,
        })
    }

    fn persist(&self, op: &str) -> Result<(), EngineError> {
        if self.sync_on_write {
            self.db
                .persist(PersistMode::SyncAll)
                .map_err(|e| rejected(op, e))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for DiskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskStore")
            .field("sync_on_write", &self.sync_on_write)
            .finish_non_exhaustive()
    }
}

fn rejected(op: &str, e: fjall::Error) -> EngineError {
    EngineError::WriteRejected(format!("{op}: {e}"))
}

fn read_failed(op: &str, e: fjall::Error) -> EngineError {
    EngineError::ReadFailed(format!("{op}: {e}"))
}

impl StorageEngine for DiskStore {
    fn count(&self) -> Result<usize, EngineError> {
        let mut count = 0;
        for kv in self.keyspace.iter() {
            kv.key().map_err(|e| read_failed("count", e))?;
            count += 1;
        }
        Ok(count)
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        let mut keys: Vec<Vec<u8>> = Vec::new();
        for kv in self.keyspace.iter() {
            let key = kv.key().map_err(|e| read_failed("clear", e))?;
            keys.push(key.to_vec());
        }

        debug!(entries = keys.len(), "clearing disk store");
        for key in keys {
            self.keyspace.remove(&key).map_err(|e| rejected("clear", e))?;
        }

        self.persist("clear")
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, EngineError> {
        if !storable(key) {
            return Ok(None);
        }

        let Some(bytes) = self.keyspace.get(key).map_err(|e| read_failed("get_item", e))? else {
            return Ok(None);
        };

        String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| EngineError::Corrupt(format!("key '{key}': {e}")))
    }

    fn set_item(&mut self, key: &str, value: Option<&str>) -> Result<(), EngineError> {
        let value = value.ok_or_else(|| missing_value("set_item"))?;
        if !storable(key) {
            return Err(EngineError::WriteRejected(format!(
                "set_item: key length {} outside 1..={}",
                key.len(),
                MAX_KEY_LEN
            )));
        }

        self.keyspace
            .insert(key, value.as_bytes())
            .map_err(|e| rejected("set_item", e))?;
        self.persist("set_item")
    }

    fn remove_item(&mut self, key: &str) -> Result<(), EngineError> {
        if !storable(key) {
            return Ok(());
        }

        self.keyspace
            .remove(key)
            .map_err(|e| rejected("remove_item", e))?;
        self.persist("remove_item")
    }
}
