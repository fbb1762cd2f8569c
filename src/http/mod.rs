//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all dispatch)
//!     → request.rs (request ID for log correlation)
//!     → routing::Router classifies the request target
//!         → Proxy:  proxy::Forwarder → response.rs (relay / error mapping)
//!         → Static: static_files.rs (ServeDir)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use request::{request_id, request_id_layer, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
pub use static_files::StaticAssets;
