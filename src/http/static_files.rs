//! Static asset resolution.
//!
//! Thin wrapper over `tower_http::services::ServeDir`: files under the root
//! are streamed with a guessed content type, misses become a plain 404.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

const NOT_FOUND_BODY: &str = "404 Not Found";

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    dir: ServeDir,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            dir: ServeDir::new(root.into()),
        }
    }

    /// Resolve the request path against the root.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let response = match self.dir.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if response.status() == StatusCode::NOT_FOUND {
            return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
        }
        response.map(Body::new)
    }
}
