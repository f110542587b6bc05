use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::resolver::DEFAULT_MARKER_ATTRIBUTE;
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::types::LanguageCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration syntax: {0}")]
    SyntaxError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Used when no valid preference is stored.
    pub default_language: LanguageCode,

    /// Storage slot holding the chosen language.
    pub storage_key: String,

    /// Attribute whose value is the translation key of an element.
    pub marker_attribute: String,

    pub key_separator: String,

    /// Dictionary file relative to the site root.
    /// If unset, the dictionary compiled into the crate is used.
    pub dictionary_path: Option<String>,

    pub toggle: ToggleSettings,

    /// Pages scanned by `audit`.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleSettings {
    /// CSS selector of the header element that receives the control.
    pub container_selector: String,
    pub element_id: String,
    pub class_name: String,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            container_selector: "header .flex.items-center.gap-4".to_string(),
            element_id: "language-switcher-btn".to_string(),
            class_name: "text-[#6B1C23] font-sans text-sm tracking-widest uppercase \
                         hover:opacity-70 transition-opacity font-medium px-3 py-2 \
                         rounded-md hover:bg-[#6B1C23]/5"
                .to_string(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::Ar,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            key_separator: ".".to_string(),
            dictionary_path: None,
            toggle: ToggleSettings::default(),
            include_patterns: vec!["**/*.html".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}

impl SiteSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid attribute name
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage_key.is_empty() {
            errors.push(ValidationError::new(
                "storageKey",
                "The storage key cannot be empty. Example: \"site_language\"",
            ));
        }

        if self.marker_attribute.is_empty() {
            errors.push(ValidationError::new(
                "markerAttribute",
                "The marker attribute cannot be empty. Example: \"data-i18n\"",
            ));
        } else if !is_attribute_name(&self.marker_attribute) {
            errors.push(ValidationError::new(
                "markerAttribute",
                format!("'{}' is not a valid attribute name", self.marker_attribute),
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if let Some(path) = &self.dictionary_path
            && path.is_empty()
        {
            errors.push(ValidationError::new(
                "dictionaryPath",
                "The path cannot be empty. Remove this field to use the built-in dictionary",
            ));
        }

        if self.toggle.container_selector.trim().is_empty() {
            errors.push(ValidationError::new(
                "toggle.containerSelector",
                "The selector cannot be empty. Example: \"header nav\"",
            ));
        }

        if self.toggle.element_id.is_empty() || self.toggle.element_id.contains(char::is_whitespace) {
            errors.push(ValidationError::new(
                "toggle.elementId",
                "The element id must be non-empty and contain no whitespace",
            ));
        }

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.html\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Letters, digits, `-`, `_`, `.` and `:`, not starting with a digit or `-`.
fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
