//! Upstream forwarding.
//!
//! # Responsibilities
//! - Rewrite `/api/<tail>` into `<upstream base>/<tail>`
//! - Issue exactly one request with the configured `User-Agent`
//! - Buffer the upstream status, ordered headers and body
//!
//! # Design Decisions
//! - No retries and no caching; every inbound request is one upstream attempt
//! - Inbound headers are not copied upstream, only the identity header is set
//! - Headers kept as an ordered list so duplicates survive the relay
//! - The target goes out as a pre-built `Uri`: no dot-segment removal, no re-escaping

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::USER_AGENT;
use axum::http::uri::InvalidUri;
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use http_body_util::{BodyExt, Empty};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::UpstreamConfig;
use crate::proxy::error::{BuildError, ForwardError, TransportError};
use crate::routing::API_PREFIX;

type UpstreamClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Headers in the order the upstream sent them, duplicates included.
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Bytes,
}

/// Build the upstream URL for a proxied request target.
///
/// Drops the `/api` lead and keeps its trailing slash, so `/api/x?y=1`
/// against `https://host/api` becomes `https://host/api/x?y=1`. The tail is
/// appended byte for byte.
pub fn upstream_target(base: &str, target: &str) -> String {
    let lead = API_PREFIX.len() - 1;
    let tail = target.get(lead..).unwrap_or_default();

    let mut url = String::with_capacity(base.len() + tail.len());
    url.push_str(base);
    url.push_str(tail);
    url
}

/// Parse the upstream target into the `Uri` sent on the wire.
///
/// `Uri` parsing only validates; `..`, `%2e%2e` and `//` reach the upstream as written.
pub fn upstream_uri(base: &str, target: &str) -> Result<Uri, InvalidUri> {
    Uri::try_from(upstream_target(base, target))
}

/// Stateless client for the configured upstream API.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: UpstreamClient,
    base_url: Arc<str>,
    user_agent: HeaderValue,
    timeout: Duration,
}

impl Forwarder {
    /// Create a forwarder from the upstream section of the config.
    pub fn new(config: &UpstreamConfig) -> Result<Self, BuildError> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            base_url: Arc::from(config.base_url.as_str()),
            user_agent: HeaderValue::from_str(&config.user_agent)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Methods the forwarder will send upstream.
    pub fn accepts(method: &Method) -> bool {
        *method == Method::GET || *method == Method::HEAD
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward one request and buffer the result.
    ///
    /// A 4xx/5xx status comes back as [`ForwardError::Application`] carrying
    /// the upstream body; anything without a response is a transport error.
    /// The timeout covers both the response head and the body.
    pub async fn forward(
        &self,
        method: Method,
        target: &str,
    ) -> Result<UpstreamResponse, ForwardError> {
        let uri = upstream_uri(&self.base_url, target).map_err(TransportError::from)?;

        let mut request = Request::new(Empty::<Bytes>::new());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        request
            .headers_mut()
            .insert(USER_AGENT, self.user_agent.clone());

        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
    }

    async fn exchange(&self, request: Request<Empty<Bytes>>) -> Result<UpstreamResponse, ForwardError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(TransportError::from)?
            .to_bytes();

        if status.is_client_error() || status.is_server_error() {
            return Err(ForwardError::Application { status, body });
        }

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
