//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! "/api/<tail>" request target
//!     → forwarder.rs (strip "/api", prepend upstream base, set User-Agent)
//!     → one upstream request (bounded by upstream.timeout_secs)
//!     → UpstreamResponse            (status < 400)
//!     → ForwardError::Application   (status >= 400, body kept)
//!     → ForwardError::Transport     (no response at all)
//! ```

pub mod error;
pub mod forwarder;

pub use error::{transport_kind, BuildError, ForwardError, TransportError};
pub use forwarder::{upstream_target, upstream_uri, Forwarder, UpstreamResponse};
