//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to `tower_http`'s request traces.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a given level.
pub fn default_directive(level: &str) -> String {
    format!("fpl_proxy={level},tower_http={level}")
}

/// Initialize the global tracing subscriber.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
