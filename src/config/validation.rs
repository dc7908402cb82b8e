//! Configuration validation.
//!
//! Semantic checks run after serde has accepted the syntax. Every problem is
//! reported, not just the first.

use std::net::SocketAddr;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),
    #[error("upstream.{field} `{value}` is not a valid URL: {reason}")]
    UpstreamUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("upstream.{field} must use http or https, got `{scheme}`")]
    UpstreamScheme { field: &'static str, scheme: String },
    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration. Empty upstream URLs are accepted; see
/// [`missing_upstreams`].
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_url("token_url", &config.upstream.token_url, &mut errors);
    check_url("user_info_url", &config.upstream.user_info_url, &mut errors);

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Names of the environment variables whose upstream URL is still unset.
pub fn missing_upstreams(config: &ProxyConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.upstream.token_url.is_empty() {
        missing.push(crate::config::schema::ENV_TOKEN_URL);
    }
    if config.upstream.user_info_url.is_empty() {
        missing.push(crate::config::schema::ENV_USER_INFO_URL);
    }
    missing
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.is_empty() {
        return;
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::UpstreamScheme {
            field,
            scheme: url.scheme().to_string(),
        }),
        Err(e) => errors.push(ValidationError::UpstreamUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
