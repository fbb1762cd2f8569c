//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request target ("/api/fixtures/?event=3")
//!     → router.rs (ordered prefix table)
//!     → matcher.rs (literal byte-prefix test)
//!     → Return: RouteKind::Proxy or RouteKind::Static
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same route
//! - First match wins, static is the fallback

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, PathPrefixMatcher};
pub use router::{RouteKind, Router, API_PREFIX};
