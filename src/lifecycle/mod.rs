//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build upstream client → Bind listener → Serve
//!
//! Shutdown:
//!     SIGINT/SIGTERM (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → axum stops accepting → in-flight requests finish → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
