//! Response construction.
//!
//! # Responsibilities
//! - Attach permissive CORS headers to every response
//! - Wrap relayed bodies with a JSON content type
//!
//! # Design Decisions
//! - CORS headers are set by a layer, so 404/413 and error bodies get them too
//! - Relayed bodies are passed through byte for byte, never re-serialized

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";
/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Add the CORS response headers to every route of `router`, fallback included.
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

/// Raw JSON bytes with the given status.
pub fn json_bytes(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(body),
    )
        .into_response()
}
