//! Forwarding error taxonomy.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::InvalidHeaderValue;
use axum::http::uri::InvalidUri;
use axum::http::StatusCode;

/// Outcome of a single upstream exchange that did not produce a relayable response.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// Upstream was reachable but answered with a 4xx/5xx status.
    #[error("upstream responded with {status}")]
    Application { status: StatusCode, body: Bytes },

    /// No structured response: connect, DNS, timeout, protocol or body read failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] TransportError),
}

/// Failures that leave the proxy without an upstream response to relay.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid upstream target: {0}")]
    Target(#[from] InvalidUri),

    #[error("{0}")]
    Client(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read upstream body: {0}")]
    Body(#[from] hyper::Error),

    #[error("no upstream response within {0:?}")]
    Timeout(Duration),
}

/// Classify a transport failure for metrics labels.
pub fn transport_kind(err: &TransportError) -> &'static str {
    match err {
        TransportError::Timeout(_) => "timeout",
        TransportError::Client(err) if err.is_connect() => "connect",
        TransportError::Target(_) => "url",
        TransportError::Client(_) | TransportError::Body(_) => "transport",
    }
}

/// Failure to construct a [`Forwarder`](crate::proxy::Forwarder).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to set up upstream TLS: {0}")]
    Tls(#[from] rustls::Error),

    #[error("invalid user agent: {0}")]
    UserAgent(#[from] InvalidHeaderValue),
}
