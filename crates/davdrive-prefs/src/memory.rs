//! In-memory preferences store

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use davdrive_core::ports::IPreferencesStore;

/// Preferences held in memory only
///
/// Used by tests and ephemeral sessions; same semantics as the file-backed
/// store minus persistence.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    state: Mutex<HashMap<String, Value>>,
}

impl InMemoryPreferences {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn get_value(&self, key: &str) -> Option<Value> {
        self.state.lock().unwrap().get(key).cloned()
    }

    fn put_value(&self, key: &str, value: Value) {
        self.state.lock().unwrap().insert(key.to_string(), value);
    }
}

impl IPreferencesStore for InMemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get_value(key)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    fn put_string(&self, key: &str, value: &str) {
        self.put_value(key, Value::String(value.to_string()));
    }

    fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.get_value(key)
            .and_then(|v| v.as_i64())
            .map(|v| v as i32)
            .unwrap_or(default)
    }

    fn put_i32(&self, key: &str, value: i32) {
        self.put_value(key, Value::from(value));
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get_value(key)
            .and_then(|v| v.as_i64())
            .unwrap_or(default)
    }

    fn put_i64(&self, key: &str, value: i64) {
        self.put_value(key, Value::from(value));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_value(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.put_value(key, Value::Bool(value));
    }

    fn remove(&self, key: &str) {
        self.state.lock().unwrap().remove(key);
    }
}
