//! Key/value store trait definitions

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Persistent key/value storage scoped to one trigger instance
///
/// The host owns the storage; triggers only read and write JSON values
/// under well-known keys.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace the value under `key`
    fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key` (no-op if absent)
    fn delete(&self, key: &str) -> Result<()>;
}

/// Typed helpers on top of [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn put_as<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put(key, serde_json::to_value(value)?)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
