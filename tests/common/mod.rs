//! Common test utilities and fixtures.
//!
//! Shared engine doubles and store builders used across the test suite.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use local_kv::{EngineError, LocalStorage, StorageEngine, VolatileStore};

// =============================================================================
// Engine Doubles
// =============================================================================

/// Failure switches shared between a test and the engine it handed over.
#[derive(Debug, Default)]
pub struct Faults {
    pub reject_writes: Cell<bool>,
    pub fail_reads: Cell<bool>,
}

/// Host facility double: a [`VolatileStore`] whose operations can be made to
/// fail after the facade has been built.
pub struct FlakyEngine {
    inner: VolatileStore,
    faults: Rc<Faults>,
}

impl FlakyEngine {
    pub fn new(faults: Rc<Faults>) -> Self {
        Self {
            inner: VolatileStore::new(),
            faults,
        }
    }

    fn check_write(&self) -> Result<(), EngineError> {
        if self.faults.reject_writes.get() {
            return Err(EngineError::WriteRejected("quota exceeded".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), EngineError> {
        if self.faults.fail_reads.get() {
            return Err(EngineError::ReadFailed("device unavailable".to_string()));
        }
        Ok(())
    }
}

impl StorageEngine for FlakyEngine {
    fn count(&self) -> Result<usize, EngineError> {
        self.check_read()?;
        self.inner.count()
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        self.check_write()?;
        self.inner.clear()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, EngineError> {
        self.check_read()?;
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: Option<&str>) -> Result<(), EngineError> {
        self.check_write()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), EngineError> {
        self.check_write()?;
        self.inner.remove_item(key)
    }
}

/// Engine that fails every call, standing in for a facility that is
/// present but unusable.
pub struct BrokenEngine;

impl StorageEngine for BrokenEngine {
    fn count(&self) -> Result<usize, EngineError> {
        Err(EngineError::ReadFailed("broken".to_string()))
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        Err(EngineError::WriteRejected("broken".to_string()))
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, EngineError> {
        Err(EngineError::ReadFailed("broken".to_string()))
    }

    fn set_item(&mut self, _key: &str, _value: Option<&str>) -> Result<(), EngineError> {
        Err(EngineError::WriteRejected("broken".to_string()))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), EngineError> {
        Err(EngineError::WriteRejected("broken".to_string()))
    }
}

// =============================================================================
// Store Builders
// =============================================================================

/// Facade over a [`FlakyEngine`], plus the switches controlling it.
pub fn flaky_storage() -> (Rc<Faults>, LocalStorage) {
    let faults = Rc::new(Faults::default());
    let engine = FlakyEngine::new(Rc::clone(&faults));
    (faults, LocalStorage::with_host(Some(Box::new(engine))))
}

/// Facade over a host whose raw entries are set before construction.
pub fn seeded_storage(entries: &[(&str, &str)]) -> anyhow::Result<LocalStorage> {
    let mut host = VolatileStore::new();
    for (key, value) in entries {
        host.set_item(key, Some(*value))?;
    }
    Ok(LocalStorage::with_host(Some(Box::new(host))))
}

/// Facade over a fresh on-disk store. Keep the directory alive for the
/// duration of the test.
#[cfg(feature = "disk")]
pub fn disk_storage() -> anyhow::Result<(tempfile::TempDir, LocalStorage)> {
    let dir = tempfile::TempDir::new()?;
    let storage = LocalStorage::open(&local_kv::StorageConfig::at(dir.path().join("db")));
    Ok((dir, storage))
}
