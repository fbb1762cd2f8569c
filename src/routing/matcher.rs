//! Route matching logic.
//!
//! # Responsibilities
//! - Match the raw request target (path plus query) against a prefix
//!
//! # Design Decisions
//! - Pure byte comparison: no case folding, no slash collapsing, no decoding
//! - No regex to keep matching O(prefix length)

/// Trait for matching request targets against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request target matches this condition.
    fn matches(&self, target: &str) -> bool;
}

/// Matches a literal prefix of the request target.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, target: &str) -> bool {
        target.as_bytes().starts_with(self.prefix.as_bytes())
    }
}
