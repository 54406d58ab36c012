use crate::foundation::error::SvgvidgenResult;
use crate::prefs::record::PreferenceRecord;
use crate::prefs::store::KeyValueStore;
use crate::ui::UiState;

/// Fixed storage key the preference record lives under.
pub const PREFERENCES_KEY: &str = "aiToSvgPreferences";

/// Reads and writes the single [`PreferenceRecord`] of a [`KeyValueStore`].
#[derive(Debug)]
pub struct PreferenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Wrap a backing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap into the backing store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Persist `record` under [`PREFERENCES_KEY`]. Storage failures are returned, not logged.
    #[tracing::instrument(skip(self))]
    pub fn save(&mut self, record: &PreferenceRecord) -> SvgvidgenResult<()> {
        let json = record.to_json()?;
        self.store.set(PREFERENCES_KEY, &json)?;
        tracing::debug!(bytes = json.len(), "preferences saved");
        Ok(())
    }

    /// Read the stored record.
    ///
    /// Returns `None` when nothing is stored, when the medium cannot be read, and when the
    /// stored value does not parse as a complete record. The last two are logged.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Option<PreferenceRecord> {
        let raw = match self.store.get(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(%err, "failed to read preferences");
                return None;
            }
        };

        match PreferenceRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(%err, "failed to load preferences, ignoring stored value");
                None
            }
        }
    }

    /// Load and apply to the checkboxes of `ui`. Returns whether anything was restored;
    /// when it returns `false` the UI is untouched.
    pub fn restore_into(&self, ui: &mut UiState) -> bool {
        match self.load() {
            Some(record) => {
                ui.apply_preferences(&record);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prefs/adapter.rs"]
mod tests;
