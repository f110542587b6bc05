//! Site audit: markup keys that do not resolve and dictionary keys that
//! exist for only some languages.

/// Marker attribute extraction
mod scanner;
/// Page discovery
mod workspace;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

pub use scanner::{
    MarkerUsage,
    extract_marker_keys,
};
use thiserror::Error;

use crate::config::{
    MatcherError,
    PageMatcher,
    SiteSettings,
};
use crate::dictionary::TranslationDictionary;
use crate::types::LanguageCode;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Invalid marker attribute '{attribute}': {source}")]
    MarkerPattern {
        attribute: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read page {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A key used in markup that does not resolve for some languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslation {
    /// Page path relative to the site root.
    pub file: PathBuf,
    pub line: usize,
    pub key: String,
    pub languages: Vec<LanguageCode>,
}

/// A dictionary key present for some languages but not for others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricKey {
    pub key: String,
    pub missing_in: Vec<LanguageCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub pages_scanned: usize,
    pub missing: Vec<MissingTranslation>,
    pub asymmetric: Vec<AsymmetricKey>,
}

impl AuditReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.asymmetric.is_empty()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.missing {
            writeln!(
                f,
                "{}:{}: '{}' is missing for {}",
                entry.file.display(),
                entry.line,
                entry.key,
                join_codes(&entry.languages)
            )?;
        }
        for entry in &self.asymmetric {
            writeln!(
                f,
                "dictionary: '{}' is missing for {}",
                entry.key,
                join_codes(&entry.missing_in)
            )?;
        }
        write!(
            f,
            "{} page(s) scanned, {} missing translation(s), {} asymmetric key(s)",
            self.pages_scanned,
            self.missing.len(),
            self.asymmetric.len()
        )
    }
}

/// `ar, en` style list for report lines.
fn join_codes(languages: &[LanguageCode]) -> String {
    languages.iter().map(|lang| lang.as_str()).collect::<Vec<_>>().join(", ")
}

/// Scans every page under `site_root` and checks the dictionary.
pub fn audit_site(
    site_root: &Path,
    settings: &SiteSettings,
    dictionary: &TranslationDictionary,
) -> Result<AuditReport, AuditError> {
    let matcher = PageMatcher::new(site_root.to_path_buf(), settings)?;
    let pages = workspace::find_pages(&matcher);

    let mut report = AuditReport { pages_scanned: pages.len(), ..AuditReport::default() };
    for page in &pages {
        let html = std::fs::read_to_string(page)
            .map_err(|source| AuditError::Read { path: page.clone(), source })?;
        let usages = extract_marker_keys(&html, &settings.marker_attribute).map_err(|source| {
            AuditError::MarkerPattern { attribute: settings.marker_attribute.clone(), source }
        })?;

        for usage in usages {
            if usage.key.is_empty() {
                continue;
            }
            let languages: Vec<_> = LanguageCode::ALL
                .into_iter()
                .filter(|&lang| dictionary.lookup(&usage.key, lang, &settings.key_separator).is_none())
                .collect();
            if !languages.is_empty() {
                report.missing.push(MissingTranslation {
                    file: workspace::relative_to(page, site_root).to_path_buf(),
                    line: usage.line,
                    key: usage.key,
                    languages,
                });
            }
        }
    }

    report.asymmetric = check_dictionary(dictionary, &settings.key_separator);
    tracing::debug!(
        pages = report.pages_scanned,
        missing = report.missing.len(),
        asymmetric = report.asymmetric.len(),
        "Audit finished"
    );
    Ok(report)
}

/// Keys that some supported language lacks, sorted by key.
#[must_use]
pub fn check_dictionary(dictionary: &TranslationDictionary, separator: &str) -> Vec<AsymmetricKey> {
    let per_language: Vec<(LanguageCode, BTreeSet<String>)> = LanguageCode::ALL
        .into_iter()
        .map(|lang| (lang, dictionary.keys(lang, separator)))
        .collect();

    let all_keys: BTreeSet<&String> = per_language.iter().flat_map(|(_, keys)| keys).collect();

    all_keys
        .into_iter()
        .filter_map(|key| {
            let missing_in: Vec<_> = per_language
                .iter()
                .filter(|(_, keys)| !keys.contains(key))
                .map(|(lang, _)| *lang)
                .collect();
            (!missing_in.is_empty()).then(|| AsymmetricKey { key: key.clone(), missing_in })
        })
        .collect()
}
