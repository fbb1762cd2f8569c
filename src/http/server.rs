//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Classify each request and hand it to the forwarder or the asset service
//! - Record per-request metrics
//! - Serve until a shutdown signal arrives

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::request::{request_id, request_id_layer};
use crate::http::response;
use crate::http::static_files::StaticAssets;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::proxy::{transport_kind, BuildError, ForwardError, Forwarder};
use crate::routing::{RouteKind, Router as ProxyRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
    pub assets: StaticAssets,
}

/// HTTP server for the development proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, BuildError> {
        let state = AppState {
            router: Arc::new(ProxyRouter::default()),
            forwarder: Forwarder::new(&config.upstream)?,
            assets: StaticAssets::new(config.assets.root.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        // Fallback rather than path routes: classification must see every target.
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops on Ctrl+C, SIGTERM, or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::wait_for_termination() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Catch-all handler: classify, then forward or serve from disk.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();

    // Path plus query; the query is part of what gets forwarded.
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path())
        .to_string();

    let route = state.router.classify(&target);
    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        target = %target,
        route = route.as_str(),
        "Request classified"
    );

    let response = match route {
        RouteKind::Proxy => {
            let method = request.method().clone();
            proxy_request(&state.forwarder, &request_id, method, &target).await
        }
        RouteKind::Static => state.assets.serve(request).await,
    };

    metrics::record_request(route.as_str(), response.status().as_u16(), start_time);
    response
}

async fn proxy_request(
    forwarder: &Forwarder,
    request_id: &str,
    method: Method,
    target: &str,
) -> Response {
    if !Forwarder::accepts(&method) {
        tracing::warn!(request_id = %request_id, method = %method, target = %target, "Method not forwarded");
        return response::method_not_allowed();
    }

    match forwarder.forward(method, target).await {
        Ok(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                status = %upstream.status,
                headers = upstream.headers.len(),
                bytes = upstream.body.len(),
                "Relaying upstream response"
            );
            response::relay(upstream)
        }
        Err(ForwardError::Application { status, body }) => {
            tracing::info!(request_id = %request_id, status = %status, target = %target, "Upstream error status");
            response::application_error(status, body)
        }
        Err(ForwardError::Transport(err)) => {
            let kind = transport_kind(&err);
            tracing::error!(
                request_id = %request_id,
                upstream = forwarder.base_url(),
                error = %err,
                kind,
                "Upstream request failed"
            );
            metrics::record_upstream_error(kind);
            response::transport_error(&err)
        }
    }
}
