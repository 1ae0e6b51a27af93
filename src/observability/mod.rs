//! Observability subsystem.
//!
//! Structured logging only: every subsystem emits `tracing` events with a
//! request ID field where one exists.

pub mod logging;
