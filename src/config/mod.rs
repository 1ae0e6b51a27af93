//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → PORT / CYBERHUB_* environment variables
//!     → .env fallback for credentials still missing
//!     → validation.rs (semantic checks)
//!     → RelayConfig (immutable, shared with handlers via state)
//! ```
//!
//! # Design Decisions
//! - Loaded once at startup; handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - The fallback file is read, never exported into the process environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, ConfigError};
pub use schema::{
    CredentialsConfig, ListenerConfig, ObservabilityConfig, RelayConfig, SecurityConfig,
    UpstreamConfig,
};
pub use validation::ValidationError;
