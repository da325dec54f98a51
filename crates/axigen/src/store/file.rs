//! JSON-file backed key/value store
//!
//! One file per trigger instance, rewritten on every change. Meant for a
//! single host process; there is no cross-process locking.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{AxigenError, Result};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (lazily) the store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store for a named trigger instance under the config state directory
    pub fn for_instance(instance: &str) -> Result<Self> {
        let dir = config::state_dir()
            .ok_or_else(|| AxigenError::Config("could not determine config directory".to_string()))?;
        Ok(Self::new(dir.join(format!("{}.json", sanitize(instance)))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        config::load_json_file(&self.path).map_err(|e| AxigenError::Store(format!("{:#}", e)))
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<()> {
        config::save_json_file(&self.path, entries).map_err(|e| AxigenError::Store(format!("{:#}", e)))
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AxigenError::Store("file store lock poisoned".to_string()))?;
        let mut entries = self.read()?;
        f(&mut entries);
        self.write(&entries)
    }
}

/// Keep instance names usable as file names
fn sanitize(instance: &str) -> String {
    instance
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
