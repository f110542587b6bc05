//! Extracts translation keys from page markup.

use regex::Regex;

/// One marker attribute found in a page.
///
/// `key` is the attribute value exactly as written; the page resolves it
/// without trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerUsage {
    pub key: String,
    /// 1-based line of the attribute.
    pub line: usize,
}

/// Builds the pattern matching `attribute="key"` (single or double quotes).
///
/// The attribute must be preceded by whitespace so that `data-i18n` does not
/// match inside `x-data-i18n`; a longer name such as `data-i18n-title` fails
/// because `=` has to follow.
fn marker_pattern(attribute: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"\s{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attribute)
    ))
}

/// Finds every `attribute="key"` in `html`, in document order.
pub fn extract_marker_keys(html: &str, attribute: &str) -> Result<Vec<MarkerUsage>, regex::Error> {
    let pattern = marker_pattern(attribute)?;

    let mut usages = Vec::new();
    for captures in pattern.captures_iter(html) {
        let Some(value) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };
        let line = html.get(..value.start()).map_or(0, |before| before.matches('\n').count()) + 1;
        usages.push(MarkerUsage { key: value.as_str().to_string(), line });
    }
    Ok(usages)
}
