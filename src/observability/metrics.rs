//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by route and status
//! - `proxy_request_duration_seconds` (histogram): handling latency by route
//! - `proxy_upstream_errors_total` (counter): transport failures by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: &'static str, status: u16, start_time: Instant) {
    ::metrics::counter!(
        "proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record an upstream exchange that produced no response.
pub fn record_upstream_error(kind: &'static str) {
    ::metrics::counter!("proxy_upstream_errors_total", "kind" => kind).increment(1);
}
