//! Preferences store port (driven/secondary port)
//!
//! A flat key-value store for small pieces of app state (lock state,
//! migration flags). Every call is independent: there is no transaction
//! across keys, and a crash between two related writes can leave an
//! inconsistent pair. Callers accept that.

/// Port trait for the key-value preferences store
///
/// Getters take a default so that reading an absent numeric/bool key never
/// errors, mirroring how the platform preferences API behaves.
pub trait IPreferencesStore: Send + Sync {
    /// Returns the string stored under `key`, if any
    fn get_string(&self, key: &str) -> Option<String>;

    /// Stores a string under `key`
    fn put_string(&self, key: &str, value: &str);

    /// Returns the i32 stored under `key`, or `default`
    fn get_i32(&self, key: &str, default: i32) -> i32;

    /// Stores an i32 under `key`
    fn put_i32(&self, key: &str, value: i32);

    /// Returns the i64 stored under `key`, or `default`
    fn get_i64(&self, key: &str, default: i64) -> i64;

    /// Stores an i64 under `key`
    fn put_i64(&self, key: &str, value: i64);

    /// Returns the bool stored under `key`, or `default`
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Stores a bool under `key`
    fn put_bool(&self, key: &str, value: bool);

    /// Removes `key` if present
    fn remove(&self, key: &str);
}
