//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming the upstream token endpoint.
pub const ENV_TOKEN_URL: &str = "OAUTH_TOKEN_URL";

/// Environment variable naming the upstream user-info endpoint.
pub const ENV_USER_INFO_URL: &str = "USER_INFO_URL";

/// Environment variable overriding the listener bind address.
pub const ENV_BIND_ADDRESS: &str = "PROXY_BIND_ADDRESS";

/// Root configuration for the OAuth proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream OAuth provider endpoints and client settings.
    pub upstream: UpstreamConfig,

    /// Inbound request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Overlay values found through `lookup` on top of this configuration.
    ///
    /// Only variables that are present replace the current value, so a TOML
    /// file can supply defaults that the environment selectively overrides.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_TOKEN_URL) {
            self.upstream.token_url = url;
        }
        if let Some(url) = lookup(ENV_USER_INFO_URL) {
            self.upstream.user_info_url = url;
        }
        if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
            self.listener.bind_address = addr;
        }
    }

    /// Overlay the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoints the two proxy routes forward to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Token endpoint receiving `POST /proxy/oauth/token` bodies.
    pub token_url: String,

    /// User-info endpoint receiving `GET /proxy/user-info` calls.
    pub user_info_url: String,

    /// Total time allowed for one upstream exchange in seconds. 0 disables it.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds. 0 disables it.
    pub connect_timeout_secs: u64,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` for outbound calls.
    pub use_system_proxy: bool,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            token_url: String::new(),
            user_info_url: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
            use_system_proxy: true,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum token request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
