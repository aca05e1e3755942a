//! Settings module - the persistence seam
//!
//! The storage backend is an external collaborator; the engine talks to it
//! through a read trait and a write trait. [`MemorySettings`] is the
//! in-crate store used by tests and by hosts that persist state themselves
//! (it serializes with serde).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read access to persisted settings
pub trait SettingsSource {
    fn get_str(&self, key: &str) -> Option<String>;
    fn get_int(&self, key: &str) -> Option<i64>;
}

/// Write access to persisted settings
pub trait SettingsEditor {
    fn put_str(&mut self, key: &str, value: &str);
    fn put_int(&mut self, key: &str, value: i64);
    fn remove(&mut self, key: &str);
}

/// One stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Int(i64),
    Text(String),
}

/// In-memory key-value store implementing both settings traits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySettings {
    values: BTreeMap<String, SettingValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl SettingsSource for MemorySettings {
    fn get_str(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            SettingValue::Text(text) => Some(text.clone()),
            SettingValue::Int(_) => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            SettingValue::Int(value) => Some(*value),
            SettingValue::Text(_) => None,
        }
    }
}

impl SettingsEditor for MemorySettings {
    fn put_str(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), SettingValue::Text(value.to_string()));
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), SettingValue::Int(value));
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
