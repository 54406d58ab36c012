//! Preference persistence.
//!
//! A [`PreferenceRecord`] is stored as JSON under [`PREFERENCES_KEY`] in any
//! [`KeyValueStore`]; [`PreferenceStore`] is the adapter the UI and the run action use.

/// Load/save adapter over a key-value store.
pub mod adapter;
/// The persisted record.
pub mod record;
/// Key-value storage backends.
pub mod store;

pub use adapter::{PREFERENCES_KEY, PreferenceStore};
pub use record::PreferenceRecord;
pub use store::{FsStore, KeyValueStore, MemoryStore};
