//! Decides the active language and keeps page, storage and toggle in step.

use std::cell::Cell;
use std::fmt;
use std::rc::{
    Rc,
    Weak,
};

use crate::config::SiteSettings;
use crate::dictionary::TranslationDictionary;
use crate::page::Page;
use crate::resolver::TranslationResolver;
use crate::storage::{
    KeyValueStorage,
    PreferenceStore,
};
use crate::toggle::LanguageToggle;
use crate::types::LanguageCode;

/// Owns the active language of one page.
///
/// Cloning yields another handle to the same state.
pub struct TranslationCoordinator<S: KeyValueStorage, P: Page> {
    /// Shared with the toggle listener through a `Weak`
    inner: Rc<CoordinatorInner<S, P>>,
}

/// State behind a [`TranslationCoordinator`] handle.
struct CoordinatorInner<S: KeyValueStorage, P: Page> {
    /// Persisted choice
    store: PreferenceStore<S>,
    /// Writes translations and direction into the page
    resolver: TranslationResolver<P>,
    /// Header switch control
    toggle: LanguageToggle<P>,
    /// Used when nothing valid is stored
    default_language: LanguageCode,
    /// Active language; only changed by `initialize` and `switch_to`
    active: Cell<LanguageCode>,
}

impl<S: KeyValueStorage + 'static, P: Page + 'static> TranslationCoordinator<S, P> {
    #[must_use]
    pub fn new(
        store: PreferenceStore<S>,
        resolver: TranslationResolver<P>,
        toggle: LanguageToggle<P>,
        default_language: LanguageCode,
    ) -> Self {
        Self {
            inner: Rc::new(CoordinatorInner {
                store,
                resolver,
                toggle,
                default_language,
                active: Cell::new(default_language),
            }),
        }
    }

    /// Wires the three components from site settings.
    #[must_use]
    pub fn from_settings(
        settings: &SiteSettings,
        storage: S,
        page: Rc<P>,
        dictionary: Rc<TranslationDictionary>,
    ) -> Self {
        let store = PreferenceStore::new(storage, settings.storage_key.clone());
        let resolver = TranslationResolver::new(
            dictionary,
            Rc::clone(&page),
            settings.marker_attribute.clone(),
            settings.key_separator.clone(),
        );
        let toggle = LanguageToggle::new(page, settings.toggle.clone());
        Self::new(store, resolver, toggle, settings.default_language)
    }

    /// Picks the language for this page load and brings the page in line
    /// with it.
    ///
    /// A stored value naming no supported language is replaced by the
    /// default.
    pub fn initialize(&self) -> LanguageCode {
        let inner = &self.inner;
        let language = match inner.store.load() {
            None => inner.default_language,
            Some(stored) => match stored.parse::<LanguageCode>() {
                Ok(language) => language,
                Err(e) => {
                    tracing::warn!(
                        "Invalid stored language preference: {e}, resetting to {}",
                        inner.default_language
                    );
                    inner.store.save(inner.default_language);
                    inner.default_language
                }
            },
        };
        inner.active.set(language);

        inner.resolver.apply_all(language);
        inner.resolver.set_document_direction(language);

        let weak: Weak<CoordinatorInner<S, P>> = Rc::downgrade(inner);
        inner.toggle.on_activate(move |target| {
            if let Some(inner) = weak.upgrade() {
                inner.switch_to(target);
            }
        });

        if let Err(e) = inner.toggle.render(language) {
            tracing::warn!(error = %e, "Failed to render language toggle");
        }

        tracing::debug!(language = %language, "Translations initialized");
        language
    }

    /// Switches to `code`. Returns false, changing nothing, if `code` is not
    /// a supported language.
    pub fn switch_language(&self, code: &str) -> bool {
        match code.parse::<LanguageCode>() {
            Ok(language) => {
                self.inner.switch_to(language);
                true
            }
            Err(e) => {
                tracing::warn!("Rejected language switch: {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn current_language(&self) -> LanguageCode {
        self.inner.active.get()
    }

    #[must_use]
    pub fn store(&self) -> &PreferenceStore<S> {
        &self.inner.store
    }

    #[must_use]
    pub fn toggle(&self) -> &LanguageToggle<P> {
        &self.inner.toggle
    }
}

impl<S: KeyValueStorage, P: Page> CoordinatorInner<S, P> {
    /// Applies an already validated language everywhere.
    fn switch_to(&self, language: LanguageCode) {
        self.active.set(language);
        // best effort; the store warns on failure
        self.store.save(language);
        self.resolver.apply_all(language);
        self.resolver.set_document_direction(language);
        if let Err(e) = self.toggle.update_label(language) {
            tracing::warn!(error = %e, "Failed to update language toggle");
        }
        tracing::debug!(language = %language, "Switched language");
    }
}

impl<S: KeyValueStorage, P: Page> Clone for TranslationCoordinator<S, P> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S: KeyValueStorage, P: Page> fmt::Debug for TranslationCoordinator<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationCoordinator")
            .field("active", &self.inner.active.get())
            .field("default_language", &self.inner.default_language)
            .field("toggle", &self.inner.toggle)
            .finish_non_exhaustive()
    }
}
