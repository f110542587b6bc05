//! Page pattern matcher for site files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::SiteSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches site files against the configured page patterns.
#[derive(Debug, Clone)]
pub struct PageMatcher {
    /// Absolute root the patterns are relative to
    site_root: PathBuf,
    /// Compiled `includePatterns`
    include_set: GlobSet,
    /// Compiled `excludePatterns`
    exclude_set: GlobSet,
}

impl PageMatcher {
    /// Creates a new matcher from settings.
    pub fn new(site_root: PathBuf, settings: &SiteSettings) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(&settings.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { site_root, include_set, exclude_set })
    }

    /// Compiles `patterns`, reporting the first invalid one through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    ///
    /// The path must be absolute and under the site root.
    #[must_use]
    pub fn is_page(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.site_root).ok() else {
            return false;
        };

        self.is_page_relative(relative_path)
    }

    /// Same as [`is_page`](Self::is_page) for a path relative to the site root.
    #[must_use]
    pub fn is_page_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
