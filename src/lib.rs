//! OAuth Provider Proxy Library
//!
//! Relays browser calls to a fixed OAuth provider so single-page apps can
//! reach its token and user-info endpoints cross-origin.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
