//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → metrics → HTTP server → bind listener → serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT/SIGTERM or Shutdown::trigger → stop accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
