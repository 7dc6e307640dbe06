//! JSON-file-backed preferences store

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::warn;

use davdrive_core::ports::IPreferencesStore;

/// Preferences persisted as one JSON object on disk
///
/// Every put rewrites the file. A failed write keeps the in-memory value
/// and logs a warning; the next successful put persists both. Readers see
/// the in-memory state, so a torn sequence of related writes can reach
/// disk partially - the port contract accepts that.
pub struct JsonFilePreferences {
    path: PathBuf,
    state: Mutex<Map<String, Value>>,
}

impl JsonFilePreferences {
    /// Opens (or creates) the preferences file at `path`
    ///
    /// # Errors
    /// Fails if an existing file cannot be read or parsed, or the parent
    /// directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn put_value(&self, key: &str, value: Value) {
        let mut state = self.state.lock().unwrap();
        state.insert(key.to_string(), value);
        Self::persist(&self.path, &state);
    }

    fn get_value(&self, key: &str) -> Option<Value> {
        self.state.lock().unwrap().get(key).cloned()
    }

    fn persist(path: &Path, state: &Map<String, Value>) {
        let serialized = match serde_json::to_string_pretty(state) {
            Ok(s) => s,
            Err(e) => {
                warn!("Could not serialize preferences: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, serialized) {
            warn!("Could not write preferences to {}: {e}", path.display());
        }
    }
}

impl IPreferencesStore for JsonFilePreferences {
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
        let mut state = self.state.lock().unwrap();
        state.remove(key);
        Self::persist(&self.path, &state);
    }
}
