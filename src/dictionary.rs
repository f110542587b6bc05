//! Bilingual translation dictionary.

use std::collections::{
    BTreeSet,
    HashMap,
};
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde_json::Value;
use thiserror::Error;

use crate::types::LanguageCode;

/// Dictionary shipped with the crate.
pub const EMBEDDED_DICTIONARY: &str = include_str!("../assets/translations.jsonc");

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dictionary: {0}")]
    Parse(String),

    #[error("Dictionary is empty")]
    Empty,

    #[error("Dictionary root must be an object keyed by language code")]
    NotAnObject,
}

/// Per-language trees of nested objects whose leaves are display strings.
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationDictionary {
    /// Root object per language
    languages: HashMap<LanguageCode, Value>,
}

impl TranslationDictionary {
    /// Builds a dictionary from a JSON value keyed by language code.
    ///
    /// Entries for unsupported codes, or whose tree is not an object, are
    /// skipped with a warning.
    pub fn from_value(root: Value) -> Result<Self, DictionaryError> {
        let Value::Object(map) = root else {
            return Err(DictionaryError::NotAnObject);
        };

        let mut languages = HashMap::new();
        for (code, tree) in map {
            let language = match code.parse::<LanguageCode>() {
                Ok(language) => language,
                Err(e) => {
                    tracing::warn!("Skipping dictionary entry: {e}");
                    continue;
                }
            };
            if !tree.is_object() {
                tracing::warn!(language = %language, "Skipping dictionary entry that is not an object");
                continue;
            }
            languages.insert(language, tree);
        }

        Ok(Self { languages })
    }

    /// Parses JSON text; comments and trailing commas are accepted.
    pub fn from_jsonc(text: &str) -> Result<Self, DictionaryError> {
        let root = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| DictionaryError::Parse(e.to_string()))?
            .ok_or(DictionaryError::Empty)?;

        Self::from_value(root)
    }

    /// Loads a dictionary file from disk.
    pub fn load_file(path: &Path) -> Result<Self, DictionaryError> {
        tracing::debug!("Loading dictionary from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_jsonc(&content)
    }

    /// The dictionary compiled into the crate.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::from_jsonc(EMBEDDED_DICTIONARY)
    }

    /// Root tree of `lang`, if the dictionary has one.
    #[must_use]
    pub fn tree(&self, lang: LanguageCode) -> Option<&Value> {
        self.languages.get(&lang)
    }

    /// Walks `key` split on `separator` and returns the string leaf it
    /// addresses.
    ///
    /// Returns `None` if the language has no tree, a segment is missing, or
    /// the path ends on something other than a string.
    #[must_use]
    pub fn lookup(&self, key: &str, lang: LanguageCode, separator: &str) -> Option<&str> {
        let mut node = self.tree(lang)?;
        for segment in key.split(separator) {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    /// Like [`lookup`](Self::lookup), but falls back to the key itself and
    /// logs a warning so that gaps stay visible on the page.
    #[must_use]
    pub fn resolve(&self, key: &str, lang: LanguageCode, separator: &str) -> String {
        if self.tree(lang).is_none() {
            tracing::warn!("Translation data not found for language: {lang}");
            return key.to_string();
        }

        if let Some(value) = self.lookup(key, lang, separator) {
            value.to_string()
        } else {
            tracing::warn!("Translation missing: {key} for language {lang}");
            key.to_string()
        }
    }

    /// All leaf keys of `lang`, flattened with `separator`.
    #[must_use]
    pub fn keys(&self, lang: LanguageCode, separator: &str) -> BTreeSet<String> {
        self.tree(lang)
            .map(|tree| flatten_json(tree, separator, None).into_keys().collect())
            .unwrap_or_default()
    }
}

/// Flatten nested JSON object into a separator-joined key map.
///
/// Only string leaves are kept; they are the only values the page can show.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use site_i18n::dictionary::flatten_json;
///
/// let json = json!({
///     "nav": {
///         "home": "Home",
///         "contact": "Contact"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
/// assert_eq!(flattened.get("nav.contact"), Some(&"Contact".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {}
    }
}
