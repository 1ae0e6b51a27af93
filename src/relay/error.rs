//! Relay error types and their HTTP mapping.
//!
//! An upstream rejection (4xx/5xx with a response) is not an error here; it
//! is relayed as an ordinary [`UpstreamResponse`](super::UpstreamResponse).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures that stop a transaction from being relayed.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The inbound body is not JSON.
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// No response came back from the upstream (connect, DNS, timeout).
    #[error("upstream unreachable: {0}")]
    Network(#[source] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The upstream URL in the configuration does not parse.
    #[error("invalid upstream url: {0}")]
    UpstreamUrl(#[from] url::ParseError),
}

impl RelayError {
    /// Status code returned to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            RelayError::Network(_) => StatusCode::BAD_GATEWAY,
            RelayError::ClientBuild(_) | RelayError::UpstreamUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code placed in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::InvalidJson(_) => "invalid_json",
            RelayError::Network(_) => "network_unavailable",
            RelayError::ClientBuild(_) | RelayError::UpstreamUrl(_) => "internal_error",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.code() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_maps_to_bad_request() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        let err = RelayError::InvalidJson(err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_json");
    }

    #[test]
    fn test_url_error_is_internal() {
        let err = RelayError::from(url::Url::parse("not a url").unwrap_err());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
