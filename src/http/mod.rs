//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → token.rs | user_info.rs (method gate, validate, build outbound request)
//!     → upstream OAuth provider (shared reqwest client)
//!     → response.rs (CORS + verbatim status/headers/body, or error status)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;
pub mod token;
pub mod user_info;

pub use cors::apply_cors;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ProxyError;
pub use server::{AppState, HttpServer, ServerError};
pub use token::TOKEN_PATH;
pub use user_info::USER_INFO_PATH;
