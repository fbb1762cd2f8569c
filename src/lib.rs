//! Local development proxy for the FPL dashboard.
//!
//! Serves the single-page app's files from disk and forwards `/api/*` to the
//! Fantasy Premier League API, which does not send permissive CORS headers.
//!
//! ```text
//!     Client ──▶ http::server ──▶ routing::Router ──┬─▶ proxy::Forwarder ──▶ upstream API
//!                                                    │        │
//!                                                    │        ▼
//!                                                    │   http::response (relay / 500)
//!                                                    │
//!                                                    └─▶ http::static_files (ServeDir)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
