//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the HTTP server from a validated config
//! - Bind the listener last, then serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds after everything else is ready

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::API_PREFIX;

/// Run the proxy with an already validated config until shutdown.
pub async fn run(config: ProxyConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config)?;
    let config = server.config();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        root = %config.assets.root.display(),
        "Serving static assets"
    );
    tracing::info!(
        prefix = API_PREFIX,
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Proxying to upstream"
    );

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
