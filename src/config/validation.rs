//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream base can be concatenated with a request target
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid upstream base URL '{0}'")]
    UpstreamUrl(String),

    #[error("upstream base URL '{0}' must use http or https")]
    UpstreamScheme(String),

    #[error("upstream base URL '{0}' must not end with '/'")]
    TrailingSlash(String),

    #[error("upstream base URL '{0}' must not carry a query or fragment")]
    UpstreamSuffix(String),

    #[error("user agent must be a non-empty header value")]
    UserAgent,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("request timeout ({request}s) must exceed upstream timeout ({upstream}s)")]
    TimeoutOrder { request: u64, upstream: u64 },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    validate_upstream_base(&config.upstream.base_url, &mut errors);

    let user_agent = &config.upstream.user_agent;
    if user_agent.trim().is_empty() || HeaderValue::from_str(user_agent).is_err() {
        errors.push(ValidationError::UserAgent);
    }

    let upstream = config.upstream.timeout_secs;
    let request = config.timeouts.request_secs;
    if upstream == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if request == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    // The upstream deadline has to fire first so expiry surfaces as a 500.
    if upstream > 0 && request > 0 && request <= upstream {
        errors.push(ValidationError::TimeoutOrder { request, upstream });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream_base(base: &str, errors: &mut Vec<ValidationError>) {
    let url = match Url::parse(base) {
        Ok(url) => url,
        Err(_) => {
            errors.push(ValidationError::UpstreamUrl(base.to_string()));
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        errors.push(ValidationError::UpstreamScheme(base.to_string()));
    }
    if base.ends_with('/') {
        errors.push(ValidationError::TrailingSlash(base.to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        errors.push(ValidationError::UpstreamSuffix(base.to_string()));
    }
}
