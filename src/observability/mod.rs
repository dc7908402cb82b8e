//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup diagnostics, per-request spans (tower-http TraceLayer),
//! upstream failures (warn)
//!     → logging.rs (tracing-subscriber, fmt to stdout)
//! ```
//!
//! Request payloads and access tokens are never logged.

pub mod logging;

pub use logging::init_logging;
