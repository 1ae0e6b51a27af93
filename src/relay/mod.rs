//! Transaction relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/transactions body
//!     → serde_json::Value (400 invalid_json on failure)
//!     → payload.rs (shipping-fee patch when amount <= 0)
//!     → client.rs (Basic auth, POST upstream, 25s timeout)
//!     → UpstreamResponse (status + raw body) or RelayError
//! ```
//!
//! # Design Decisions
//! - The payload stays an untyped document so unknown fields pass through
//! - Upstream 4xx/5xx are relayed, not converted into errors
//! - No retries: one outbound call per inbound request

pub mod client;
pub mod error;
pub mod payload;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::RelayError;
pub use payload::{apply_shipping_fee, Courier};
