//! Request identification.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID for every inbound request
//! - Expose the ID to handlers and spans for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID is not propagated onto responses: relayed upstream headers must
//!   reach the client unchanged

use axum::http::{HeaderMap, HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Layer that stamps `x-request-id` on requests lacking one.
pub fn request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId)
}

/// Read the request ID, or `"unknown"` when the layer did not run.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
