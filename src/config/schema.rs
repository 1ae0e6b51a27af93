//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Payment API endpoint that creates transactions.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.cyberhubpagamentos.com/v1/transactions";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream payment API settings.
    pub upstream: UpstreamConfig,

    /// Credential pair used to authenticate against the upstream.
    pub credentials: CredentialsConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port, overridden by `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Upstream payment API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the transaction-creation endpoint.
    pub url: String,

    /// Total time allowed for the outbound call, in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: 25,
        }
    }
}

/// Public/private key pair for the upstream's Basic authorization.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Public identifier (`CYBERHUB_PUBLIC_KEY`).
    pub public_key: String,

    /// Private secret (`CYBERHUB_PRIVATE_KEY`).
    #[serde(skip_serializing)]
    pub private_key: String,
}

impl CredentialsConfig {
    /// Both halves of the pair are present.
    pub fn is_complete(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let private_key = if self.private_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("CredentialsConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &private_key)
            .finish()
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
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
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upstream_contract() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.upstream.url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.timeout_secs, 25);
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [listener]
            port = 9000

            [upstream]
            url = "http://127.0.0.1:3000/v1/transactions"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream.url, "http://127.0.0.1:3000/v1/transactions");
        assert_eq!(config.upstream.timeout_secs, 25);
        assert_eq!(config.security.max_body_size, 2 * 1024 * 1024);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let credentials = CredentialsConfig {
            public_key: "pk_live".into(),
            private_key: "sk_live_secret".into(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("pk_live"));
        assert!(!rendered.contains("sk_live_secret"));
    }
}
