//! Custom data persistence.
//!
//! Hosts back [`KeyValueStore`] with whatever they have (browser local
//! storage, a file, a map). Data is stored as JSON under a fixed key.

use std::collections::HashMap;

use super::custom::CustomGameData;

/// Default storage key.
pub const DEFAULT_STORAGE_KEY: &str = "customBirthdayGame";

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Write custom data under `key`.
pub fn save_custom_data(store: &mut dyn KeyValueStore, key: &str, data: &CustomGameData) {
    store.set(key, data.to_json().to_string());
    tracing::debug!(key, "custom game data saved");
}

/// Read custom data from `key`.
///
/// Corrupt or rule-breaking entries are logged and treated as absent.
pub fn load_custom_data(store: &dyn KeyValueStore, key: &str) -> Option<CustomGameData> {
    let raw = store.get(key)?;
    let data: CustomGameData = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring unreadable stored game data");
            return None;
        }
    };
    if let Err(err) = data.validate() {
        tracing::warn!(key, error = %err, "ignoring invalid stored game data");
        return None;
    }
    Some(data)
}

/// Remove custom data under `key`.
pub fn clear_custom_data(store: &mut dyn KeyValueStore, key: &str) {
    store.remove(key);
}
