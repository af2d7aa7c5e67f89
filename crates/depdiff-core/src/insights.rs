//! deps.dev insights lookup
//!
//! The renderer attaches a deps.dev link to an added dependency only when
//! deps.dev actually knows the package version. The existence check is an
//! I/O concern, so the renderer only sees it through [`InsightsLookup`];
//! `depdiff-info` resolves the answers ahead of time into a [`KnownInsights`].

use crate::error::LookupError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashSet;

const DEPS_DEV_URL: &str = "https://deps.dev/";

/// Characters left as-is inside a single path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Answers whether deps.dev has an entry for a package version
pub trait InsightsLookup {
    /// Check whether `ecosystem`/`name`@`version` exists
    ///
    /// # Errors
    /// Any error aborts the render that asked.
    fn exists(&self, ecosystem: &str, name: &str, version: &str) -> Result<bool, LookupError>;
}

impl<T: InsightsLookup + ?Sized> InsightsLookup for &T {
    fn exists(&self, ecosystem: &str, name: &str, version: &str) -> Result<bool, LookupError> {
        (**self).exists(ecosystem, name, version)
    }
}

/// Lookup that never attaches a link
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInsights;

impl InsightsLookup for NoInsights {
    fn exists(&self, _: &str, _: &str, _: &str) -> Result<bool, LookupError> {
        Ok(false)
    }
}

/// Prefetched set of package versions known to deps.dev
///
/// Ecosystem and name compare case-insensitively, matching how deps.dev
/// URLs are built.
#[derive(Debug, Clone, Default)]
pub struct KnownInsights {
    entries: HashSet<(String, String, String)>,
}

impl KnownInsights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package version as known
    pub fn insert(&mut self, ecosystem: &str, name: &str, version: &str) {
        self.entries.insert(Self::key(ecosystem, name, version));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(ecosystem: &str, name: &str, version: &str) -> (String, String, String) {
        (
            ecosystem.to_lowercase(),
            name.to_lowercase(),
            version.to_string(),
        )
    }
}

impl InsightsLookup for KnownInsights {
    fn exists(&self, ecosystem: &str, name: &str, version: &str) -> Result<bool, LookupError> {
        Ok(self.entries.contains(&Self::key(ecosystem, name, version)))
    }
}

/// deps.dev page of a package
///
/// Both segments are lowercased and percent-encoded, so scoped names like
/// `@types/node` stay a single path segment.
///
/// ```
/// use depdiff_core::deps_dev_url;
///
/// assert_eq!(deps_dev_url("NPM", "@types/node"), "https://deps.dev/npm/@types%2Fnode");
/// ```
pub fn deps_dev_url(ecosystem: &str, name: &str) -> String {
    format!(
        "{DEPS_DEV_URL}{}/{}",
        utf8_percent_encode(&ecosystem.to_lowercase(), PATH_SEGMENT),
        utf8_percent_encode(&name.to_lowercase(), PATH_SEGMENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_insights() {
        assert_eq!(NoInsights.exists("npm", "react", "18.0.0"), Ok(false));
    }

    #[test]
    fn test_known_insights_case_insensitive() {
        let mut known = KnownInsights::new();
        known.insert("NPM", "React", "18.0.0");

        assert_eq!(known.exists("npm", "react", "18.0.0"), Ok(true));
        assert_eq!(known.exists("npm", "react", "17.0.0"), Ok(false));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn test_deps_dev_url() {
        assert_eq!(deps_dev_url("Cargo", "Serde"), "https://deps.dev/cargo/serde");
        assert_eq!(
            deps_dev_url("pypi", "zope interface"),
            "https://deps.dev/pypi/zope%20interface"
        );
    }

    #[test]
    fn test_deps_dev_url_escapes_separators() {
        assert_eq!(deps_dev_url("npm", "a;b,c"), "https://deps.dev/npm/a%3Bb%2Cc");
        assert_eq!(deps_dev_url("npm", "a?b#c"), "https://deps.dev/npm/a%3Fb%23c");
        assert_eq!(deps_dev_url("maven", "org:artifact"), "https://deps.dev/maven/org:artifact");
    }
}
