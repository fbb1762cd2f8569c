//! Response construction for proxied requests.
//!
//! # Responsibilities
//! - Relay a buffered upstream response: status, ordered headers, body
//! - Pass upstream application errors through as status + body
//! - Map transport failures to 500 with a diagnostic string
//!
//! # Design Decisions
//! - Headers are appended, never inserted, so repeated names survive
//! - No error envelope is invented; bodies go out exactly as received

use std::error::Error;

use axum::body::{Body, Bytes};
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::proxy::UpstreamResponse;

/// Copy an upstream response onto an outbound one without filtering.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;

    let headers = response.headers_mut();
    for (name, value) in upstream.headers {
        headers.append(name, value);
    }
    response
}

/// Upstream answered with an error status: forward status and body only.
pub fn application_error(status: StatusCode, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
}

/// No upstream response at all.
pub fn transport_error(err: &(dyn Error + 'static)) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        diagnostic(err),
    )
        .into_response()
}

/// Proxy path hit with a method the forwarder does not send upstream.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, HeaderValue::from_static("GET, HEAD"))],
        "Method Not Allowed",
    )
        .into_response()
}

/// Render an error and its source chain as one line.
pub fn diagnostic(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Wrappers often repeat the inner message in their own Display.
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    if message.is_empty() {
        message.push_str("upstream request failed");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{CONTENT_LENGTH, SET_COOKIE};
    use axum::http::HeaderName;

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_relay_preserves_order_and_duplicates() {
        let upstream = UpstreamResponse {
            status: StatusCode::OK,
            headers: vec![
                (CONTENT_TYPE, HeaderValue::from_static("application/json")),
                (SET_COOKIE, HeaderValue::from_static("a=1")),
                (SET_COOKIE, HeaderValue::from_static("b=2")),
                (HeaderName::from_static("x-upstream"), HeaderValue::from_static("fpl")),
                (CONTENT_LENGTH, HeaderValue::from_static("11")),
            ],
            body: Bytes::from_static(b"{\"ok\":true}"),
        };

        let response = relay(upstream);
        assert_eq!(response.status(), StatusCode::OK);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap().to_string()))
            .collect();
        assert_eq!(
            headers,
            vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("set-cookie".to_string(), "a=1".to_string()),
                ("set-cookie".to_string(), "b=2".to_string()),
                ("x-upstream".to_string(), "fpl".to_string()),
                ("content-length".to_string(), "11".to_string()),
            ]
        );
        assert_eq!(body_bytes(response).await, Bytes::from_static(b"{\"ok\":true}"));
    }

    #[tokio::test]
    async fn test_relay_redirect_status() {
        let upstream = UpstreamResponse {
            status: StatusCode::NOT_MODIFIED,
            headers: vec![(HeaderName::from_static("etag"), HeaderValue::from_static("\"v1\""))],
            body: Bytes::new(),
        };

        let response = relay(upstream);
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(response.headers()["etag"], "\"v1\"");
    }

    #[tokio::test]
    async fn test_application_error_passthrough() {
        let response = application_error(
            StatusCode::NOT_FOUND,
            Bytes::from_static(br#"{"error":"not found"}"#),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(response).await, Bytes::from_static(br#"{"error":"not found"}"#));
    }

    #[tokio::test]
    async fn test_transport_error_is_500_with_text() {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let response = transport_error(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_bytes(response).await, Bytes::from_static(b"connection refused"));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let response = method_not_allowed();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD");
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_diagnostic_walks_source_chain() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "dns error: no such host"));
        assert_eq!(diagnostic(&err), "error sending request: dns error: no such host");
    }

    #[test]
    fn test_diagnostic_skips_repeated_cause() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "error sending request"));
        assert_eq!(diagnostic(&err), "error sending request");
    }
}
