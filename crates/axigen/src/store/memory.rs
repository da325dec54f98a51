//! In-memory key/value store
//!
//! Used by tests and by hosts that keep trigger state themselves.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::{AxigenError, Result};

/// In-memory implementation of KeyValueStore
///
/// Uses a HashMap protected by an RwLock for thread-safe access.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AxigenError {
    AxigenError::Store("in-memory store lock poisoned".to_string())
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStoreExt;
    use serde_json::json;

    #[test]
    fn test_put_get_delete() {
        let store = InMemoryStore::new();
        assert!(store.get("lastPoll").unwrap().is_none());

        store.put("lastPoll", json!(42)).unwrap();
        assert_eq!(store.get("lastPoll").unwrap(), Some(json!(42)));
        assert_eq!(store.len(), 1);

        store.put("lastPoll", json!(43)).unwrap();
        assert_eq!(store.get("lastPoll").unwrap(), Some(json!(43)));

        store.delete("lastPoll").unwrap();
        assert!(store.is_empty());
        // Deleting again is fine
        store.delete("lastPoll").unwrap();
    }

    #[test]
    fn test_typed_helpers() {
        let store = InMemoryStore::new();
        store.put_as("numbers", &vec![1, 2, 3]).unwrap();
        let numbers: Option<Vec<i32>> = store.get_as("numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let wrong: crate::Result<Option<String>> = store.get_as("numbers");
        assert!(wrong.is_err());
    }
}
