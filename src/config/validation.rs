//! Configuration validation.
//!
//! Serde handles syntax; this checks values that would only fail later at
//! bind time or on the first relayed request. All problems are reported
//! together rather than stopping at the first.

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a [`RelayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener address '{0}' is not a valid socket address")]
    InvalidListenAddress(String),

    #[error("upstream url '{0}' is not a valid URL")]
    InvalidUpstreamUrl(String),

    #[error("upstream url must use http or https, got scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a fully layered configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let bind_address = config.listener.bind_address();
    if bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidListenAddress(bind_address));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string())),
        Err(_) => errors.push(ValidationError::InvalidUpstreamUrl(config.upstream.url.clone())),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
