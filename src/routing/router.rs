//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered prefix table
//! - Classify every request target as proxy or static
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan over a table that holds a single entry by default
//! - Total: anything unmatched is static, there is no "no route" outcome

use crate::routing::matcher::{Matcher, PathPrefixMatcher};

/// Reserved prefix forwarded to the upstream API.
pub const API_PREFIX: &str = "/api/";

/// Where a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Forward to the upstream API.
    Proxy,
    /// Resolve against the static asset root.
    Static,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Proxy => "proxy",
            RouteKind::Static => "static",
        }
    }
}

/// Ordered `(prefix, route)` table, first match wins.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(PathPrefixMatcher, RouteKind)>,
}

impl Router {
    /// Build a router from an explicit table.
    pub fn new(routes: Vec<(PathPrefixMatcher, RouteKind)>) -> Self {
        Self { routes }
    }

    /// Classify a request target (path plus optional query).
    pub fn classify(&self, target: &str) -> RouteKind {
        self.routes
            .iter()
            .find(|(matcher, _)| matcher.matches(target))
            .map(|(_, kind)| *kind)
            .unwrap_or(RouteKind::Static)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(vec![(PathPrefixMatcher::new(API_PREFIX), RouteKind::Proxy)])
    }
}
