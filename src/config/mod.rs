//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)  → process environment
//! config file (TOML)    → loader.rs (parse & deserialize)
//!                       → validation.rs (semantic checks)
//! process environment   → ProxyConfig::apply_env (OAUTH_TOKEN_URL, USER_INFO_URL)
//!     → ProxyConfig (immutable)
//!     → UpstreamConfig handed to the HTTP server at construction
//! ```
//!
//! # Design Decisions
//! - Handlers never read the environment; URLs are passed in explicitly
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, ConfigError, EnvFileStatus};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, SecurityConfig, UpstreamConfig};
pub use validation::{missing_upstreams, validate_config, ValidationError};
