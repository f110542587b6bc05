//! Applies dictionary strings to the page.

use std::rc::Rc;

use crate::dictionary::TranslationDictionary;
use crate::page::Page;
use crate::types::LanguageCode;

/// Attribute marking an element as a translation target.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-i18n";

/// Resolves translation keys and writes them into marked elements.
#[derive(Debug)]
pub struct TranslationResolver<P> {
    /// Shared, immutable strings
    dictionary: Rc<TranslationDictionary>,
    /// Document being translated
    page: Rc<P>,
    /// Attribute holding each element's key
    marker_attribute: String,
    /// Splits keys into path segments
    key_separator: String,
}

impl<P: Page> TranslationResolver<P> {
    #[must_use]
    pub fn new(
        dictionary: Rc<TranslationDictionary>,
        page: Rc<P>,
        marker_attribute: impl Into<String>,
        key_separator: impl Into<String>,
    ) -> Self {
        Self {
            dictionary,
            page,
            marker_attribute: marker_attribute.into(),
            key_separator: key_separator.into(),
        }
    }

    /// Display string for `key`, or `key` itself when it does not resolve.
    #[must_use]
    pub fn resolve(&self, key: &str, lang: LanguageCode) -> String {
        self.dictionary.resolve(key, lang, &self.key_separator)
    }

    /// Rewrites the text of every marked element. Returns how many were written.
    pub fn apply_all(&self, lang: LanguageCode) -> usize {
        let mut applied = 0;
        for (element, key) in self.page.marked_elements(&self.marker_attribute) {
            if key.is_empty() {
                continue;
            }
            let text = self.resolve(&key, lang);
            self.page.set_text(&element, &text);
            applied += 1;
        }
        tracing::debug!(language = %lang, applied, "Applied translations");
        applied
    }

    /// Sets `lang` and `dir` on the root element.
    pub fn set_document_direction(&self, lang: LanguageCode) {
        let attributes = [("lang", lang.as_str()), ("dir", lang.direction().as_str())];
        for (name, value) in attributes {
            if let Err(e) = self.page.set_root_attribute(name, value) {
                tracing::warn!(error = %e, "Failed to set document attribute '{name}'");
            }
        }
    }
}
