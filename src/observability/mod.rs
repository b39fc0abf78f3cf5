//! Observability subsystem.
//!
//! Structured logging is handled by `tracing` at the call sites and
//! initialized by the binary; this module owns metric recording and
//! exposition.

pub mod metrics;
