//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that no file at all is a valid setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upstream API root used when nothing else is configured.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://fantasy.premierleague.com/api";

/// Identity sent to the upstream, which rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; FPL-Proxy/1.0)";

/// Root configuration for the development proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Remote API the `/api/` prefix is forwarded to.
    pub upstream: UpstreamConfig,

    /// Static asset serving.
    pub assets: AssetsConfig,

    /// Inbound request timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL the stripped request target is appended to. Must not end in `/`.
    pub base_url: String,

    /// Literal `User-Agent` set on every upstream request.
    pub user_agent: String,

    /// Upper bound on a single upstream exchange, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory non-proxy paths are resolved against.
    pub root: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for handling one inbound request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address the metrics endpoint listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
