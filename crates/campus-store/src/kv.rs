//! Persisted key-value records.
//!
//! Values are whole JSON documents stored under fixed keys and overwritten
//! wholesale on every write; there is no partial merge.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Minimal string key-value storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns `true` if a value was removed.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Volatile storage, used by tests and when no data directory is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Read and deserialise the JSON document under `key`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialise `value` and store it under `key`, replacing any previous value.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::ProfileSettings;

    #[test]
    fn json_round_trip_through_memory_store() {
        let mut store = MemoryStore::new();
        let settings = ProfileSettings {
            is_dark_mode: true,
            ..Default::default()
        };
        save_json(&mut store, "profileSettings", &settings).unwrap();
        let loaded: Option<ProfileSettings> = load_json(&store, "profileSettings").unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn missing_key_is_none_and_corrupt_value_errors() {
        let mut store = MemoryStore::new();
        let missing: Option<ProfileSettings> = load_json(&store, "nope").unwrap();
        assert!(missing.is_none());

        store.set("profileSettings", "{not json").unwrap();
        let err = load_json::<ProfileSettings>(&store, "profileSettings").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
