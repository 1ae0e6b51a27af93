//! Route handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::request::request_id;
use crate::http::response::json_bytes;
use crate::http::server::AppState;
use crate::relay::{apply_shipping_fee, RelayError};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Relay a transaction to the payment API.
pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let request_id = request_id(&headers);

    let mut payload = parse_payload(&body).inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected transaction body");
    })?;

    let courier = apply_shipping_fee(&mut payload);
    tracing::debug!(
        request_id = %request_id,
        courier = ?courier,
        "Relaying transaction"
    );

    let upstream = state
        .upstream
        .create_transaction(&payload)
        .await
        .inspect_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
        })?;

    tracing::info!(
        request_id = %request_id,
        status = %upstream.status,
        fee_patched = courier.is_some(),
        "Transaction relayed"
    );

    Ok(json_bytes(upstream.status, upstream.body))
}

/// Empty bodies count as `{}`.
pub fn parse_payload(body: &[u8]) -> Result<Value, RelayError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(RelayError::InvalidJson)
}

/// Preflight for any path, 404 for everything else unrouted.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_payload(b"").unwrap(), json!({}));
    }

    #[test]
    fn test_whitespace_body_is_invalid() {
        assert!(matches!(parse_payload(b"  "), Err(RelayError::InvalidJson(_))));
    }

    #[test]
    fn test_non_object_json_is_accepted() {
        assert_eq!(parse_payload(b"[1,2]").unwrap(), json!([1, 2]));
    }
}
