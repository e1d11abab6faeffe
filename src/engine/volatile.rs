//! In-process fallback engine.

use std::collections::HashMap;

use super::{EngineError, StorageEngine, missing_value};

/// String map that lives as long as its owner.
///
/// Used when the host facility is missing or fails its probe. Reads, clears
/// and removes never fail; the only error is a write without a value.
#[derive(Debug, Default, Clone)]
pub struct VolatileStore {
    entries: HashMap<String, String>,
}

impl VolatileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageEngine for VolatileStore {
    fn count(&self) -> Result<usize, EngineError> {
        Ok(self.entries.len())
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        self.entries.clear();
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: Option<&str>) -> Result<(), EngineError> {
        let value = value.ok_or_else(|| missing_value("set_item"))?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), EngineError> {
        self.entries.remove(key);
        Ok(())
    }
}
