//! Upstream payment API client.
//!
//! # Responsibilities
//! - Hold the pooled `reqwest` client and the precomputed authorization
//! - POST the transaction payload with a fixed timeout
//! - Separate "no response" from "response with an error status"

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::{CredentialsConfig, UpstreamConfig};
use crate::relay::error::RelayError;

/// Body sent back when the upstream rejects a request without one.
pub const UNAUTHORIZED_FALLBACK_BODY: &str = r#"{"message":"Não autorizado."}"#;

/// What the upstream answered, ready to be mirrored to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// `Basic base64(public:private)` header value.
pub fn basic_authorization(credentials: &CredentialsConfig) -> HeaderValue {
    let token = BASE64_STANDARD.encode(format!(
        "{}:{}",
        credentials.public_key, credentials.private_key
    ));
    // base64 output is always a valid header value
    let mut value = HeaderValue::from_str(&format!("Basic {}", token))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
    value.set_sensitive(true);
    value
}

/// Client for the transaction-creation endpoint.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
    url: Url,
    authorization: HeaderValue,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build a client from validated configuration.
    pub fn new(
        upstream: &UpstreamConfig,
        credentials: &CredentialsConfig,
    ) -> Result<Self, RelayError> {
        let url = Url::parse(&upstream.url)?;
        let timeout = Duration::from_secs(upstream.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RelayError::ClientBuild)?;

        Ok(Self {
            client,
            url,
            authorization: basic_authorization(credentials),
            timeout,
        })
    }

    /// Forward a transaction payload.
    ///
    /// Returns `Err(RelayError::Network)` only when there is no response to
    /// relay; every upstream status, including 4xx/5xx, is an `Ok`.
    pub async fn create_transaction(&self, payload: &Value) -> Result<UpstreamResponse, RelayError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.authorization.clone())
            .json(payload)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = response.status();
        let rejected = status.is_client_error() || status.is_server_error();

        let body = match response.bytes().await {
            Ok(body) if rejected && body.is_empty() => {
                Bytes::from_static(UNAUTHORIZED_FALLBACK_BODY.as_bytes())
            }
            Ok(body) => body,
            Err(e) if rejected => {
                tracing::warn!(status = %status, error = %e, "Failed to read upstream error body");
                Bytes::from_static(UNAUTHORIZED_FALLBACK_BODY.as_bytes())
            }
            Err(e) => return Err(RelayError::Network(e)),
        };

        tracing::debug!(
            status = %status,
            body_len = body.len(),
            timeout = ?self.timeout,
            "Upstream responded"
        );

        Ok(UpstreamResponse { status, body })
    }
}
