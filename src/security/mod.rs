//! Security-relevant header handling.
//!
//! # Data Flow
//! ```text
//! Upstream response:
//!     → headers.rs (copy values, drop connection framing)
//!     → http::cors (CORS headers for browser callers)
//!     → client
//! ```

pub mod headers;
