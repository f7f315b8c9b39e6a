//! String-keyed settings storage.

use std::collections::HashMap;

use tracing::debug;

use super::types::{RateConfig, SettingKey};

/// A key-value store holding the string-serialized settings.
///
/// Implementations only store and return raw values; typing and validation
/// happen in [`RateConfig::from_store`].
pub trait SettingsStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: SettingKey) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: SettingKey, value: String);

    /// Writes the default for every key that has no stored value yet.
    ///
    /// Existing values are never overwritten, so running this on every
    /// start-up is safe.
    fn initialize_defaults(&mut self) {
        for key in SettingKey::ALL {
            if self.get(key).is_none() {
                debug!(key = %key, value = key.default_value(), "Populating default setting");
                self.set(key, key.default_value().to_string());
            }
        }
    }

    /// Writes every field of `config`.
    fn write_config(&mut self, config: &RateConfig) {
        for (key, value) in config.entries() {
            self.set(key, value);
        }
    }
}

/// In-memory [`SettingsStore`].
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: HashMap<SettingKey, String>,
}

impl MemorySettingsStore {
    /// Creates an empty store. Call [`SettingsStore::initialize_defaults`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already populated with the defaults.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.initialize_defaults();
        store
    }

    /// Deletes a stored value.
    pub fn remove(&mut self, key: SettingKey) -> Option<String> {
        self.values.remove(&key)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SettingKey, value: String) {
        self.values.insert(key, value);
    }
}
