//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A display language supported by the site.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    Ar,
    En,
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    Rtl,
    Ltr,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rtl => "rtl",
            Self::Ltr => "ltr",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the language table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub code: LanguageCode,
    pub direction: TextDirection,
    /// Short label shown on the toggle when this language is the switch target.
    pub toggle_label: &'static str,
    /// Accessible name and tooltip for switching to this language.
    pub switch_prompt: &'static str,
    /// Language offered by the toggle while this one is active.
    pub next: LanguageCode,
}

/// Arabic row of [`LANGUAGES`].
const ARABIC: LanguageProfile = LanguageProfile {
    code: LanguageCode::Ar,
    direction: TextDirection::Rtl,
    toggle_label: "عربي",
    switch_prompt: "التبديل إلى العربية",
    next: LanguageCode::En,
};

/// English row of [`LANGUAGES`].
const ENGLISH: LanguageProfile = LanguageProfile {
    code: LanguageCode::En,
    direction: TextDirection::Ltr,
    toggle_label: "EN",
    switch_prompt: "Switch to English",
    next: LanguageCode::Ar,
};

/// Every supported language, in the order they are offered.
///
/// Adding a language means adding a `LanguageCode` variant and a row here;
/// direction and toggle behavior are read from this table only.
pub const LANGUAGES: [LanguageProfile; 2] = [ARABIC, ENGLISH];

/// Returned when a string does not name a supported language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported language: '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl LanguageCode {
    /// All supported codes.
    pub const ALL: [Self; 2] = [Self::Ar, Self::En];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Returns this language's row of [`LANGUAGES`].
    #[must_use]
    pub const fn profile(self) -> &'static LanguageProfile {
        match self {
            Self::Ar => &ARABIC,
            Self::En => &ENGLISH,
        }
    }

    #[must_use]
    pub const fn direction(self) -> TextDirection {
        self.profile().direction
    }

    /// The language the toggle offers while `self` is active.
    #[must_use]
    pub const fn toggle_target(self) -> Self {
        self.profile().next
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LANGUAGES
            .iter()
            .map(|profile| profile.code)
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::arabic("ar", LanguageCode::Ar)]
    #[case::english("en", LanguageCode::En)]
    fn parses_supported_codes(#[case] input: &str, #[case] expected: LanguageCode) {
        assert_that!(input.parse::<LanguageCode>(), ok(eq(&expected)));
    }

    #[rstest]
    #[case::french("fr")]
    #[case::uppercase("AR")]
    #[case::region("en-US")]
    #[case::padded(" en")]
    #[case::empty("")]
    fn rejects_unsupported_codes(#[case] input: &str) {
        assert_that!(
            input.parse::<LanguageCode>(),
            err(eq(&UnsupportedLanguage(input.to_string())))
        );
    }

    #[rstest]
    #[case::arabic(LanguageCode::Ar, TextDirection::Rtl)]
    #[case::english(LanguageCode::En, TextDirection::Ltr)]
    fn direction_comes_from_table(#[case] code: LanguageCode, #[case] expected: TextDirection) {
        assert_that!(code.direction(), eq(expected));
    }

    #[rstest]
    fn toggle_target_is_the_other_language() {
        assert_that!(LanguageCode::Ar.toggle_target(), eq(LanguageCode::En));
        assert_that!(LanguageCode::En.toggle_target(), eq(LanguageCode::Ar));
    }

    #[rstest]
    fn table_rows_match_their_codes() {
        for code in LanguageCode::ALL {
            assert_that!(code.profile().code, eq(code));
            assert_that!(code.toggle_target(), not(eq(code)));
        }
    }

    #[rstest]
    fn serializes_lowercase() {
        assert_that!(serde_json::to_string(&LanguageCode::En).unwrap(), eq("\"en\""));
        let parsed: LanguageCode = serde_json::from_str("\"ar\"").unwrap();
        assert_that!(parsed, eq(LanguageCode::Ar));
    }
}
