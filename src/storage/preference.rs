//! Persisted language preference.

use super::KeyValueStorage;
use crate::types::LanguageCode;

/// Storage slot holding the chosen language code.
pub const DEFAULT_STORAGE_KEY: &str = "lyore_language";

/// Written and removed again to find out whether storage works at all.
const PROBE_KEY: &str = "__storage_test__";

/// Reads and writes the user's language choice.
///
/// Never fails towards the caller: an unusable backend reads as "no
/// preference" and writes report `false`.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    /// Underlying key-value storage
    backend: S,
    /// Slot holding the language code
    key: String,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    #[must_use]
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    /// Returns true if the backend accepts a write followed by a removal.
    #[must_use]
    pub fn is_available(&self) -> bool {
        let probe = self
            .backend
            .set_item(PROBE_KEY, "test")
            .and_then(|()| self.backend.remove_item(PROBE_KEY));

        match probe {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Preference storage is unavailable");
                false
            }
        }
    }

    /// Persists `lang`. Returns false when nothing was written.
    pub fn save(&self, lang: LanguageCode) -> bool {
        if !self.is_available() {
            tracing::warn!(language = %lang, "Storage is unavailable; language preference not saved");
            return false;
        }

        match self.backend.set_item(&self.key, lang.as_str()) {
            Ok(()) => {
                tracing::debug!(language = %lang, "Saved language preference");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save language preference");
                false
            }
        }
    }

    /// Returns the stored value as written, without checking that it names
    /// a supported language.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        if !self.is_available() {
            return None;
        }

        match self.backend.get_item(&self.key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to retrieve language preference");
                None
            }
        }
    }
}
