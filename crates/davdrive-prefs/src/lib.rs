//! Preferences adapters for davdrive
//!
//! Two implementations of the [`IPreferencesStore`] port:
//! - [`JsonFilePreferences`] - a single JSON document on disk, written
//!   through on every put. Each key is independent; there is no
//!   transaction across keys, matching the port contract.
//! - [`InMemoryPreferences`] - a HashMap behind a mutex, for tests and
//!   ephemeral sessions.

pub mod file;
pub mod memory;

pub use file::JsonFilePreferences;
pub use memory::InMemoryPreferences;
