//! Resource locators
//!
//! A [`ResourcePath`] is a base origin followed by `/`-joined segments.
//! Segments are opaque: nothing is encoded or trimmed, so callers must pass
//! segments that are already safe to put in a URL.

use crate::types::SearchEndpoint;
use std::fmt;

/// An immutable resource locator built from a base and path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    value: String,
}

impl ResourcePath {
    /// Start a locator at the given base origin
    pub fn new(base: impl Into<String>) -> Self {
        Self { value: base.into() }
    }

    /// Return a new locator with one more segment
    #[must_use]
    pub fn join(&self, segment: impl AsRef<str>) -> Self {
        Self {
            value: format!("{}/{}", self.value, segment.as_ref()),
        }
    }

    /// Return a new locator with all segments appended in order
    #[must_use]
    pub fn join_all<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(self.clone(), |path, segment| path.join(segment))
    }

    /// The locator as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    // ========================================================================
    // Provider endpoints
    // ========================================================================

    /// `users/by/username/<username>`
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Self {
        self.join_all(["users", "by", "username", username])
    }

    /// `users/by` (multi-user lookup)
    #[must_use]
    pub fn users_by(&self) -> Self {
        self.join_all(["users", "by"])
    }

    /// `tweets` (lookup by ids)
    #[must_use]
    pub fn tweets(&self) -> Self {
        self.join("tweets")
    }

    /// `tweets/search/recent` or `tweets/search/all`
    #[must_use]
    pub fn search(&self, endpoint: SearchEndpoint) -> Self {
        self.join_all(["tweets", "search", endpoint.segment()])
    }

    /// `tweets/counts/recent` or `tweets/counts/all`
    #[must_use]
    pub fn counts(&self, endpoint: SearchEndpoint) -> Self {
        self.join_all(["tweets", "counts", endpoint.segment()])
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
