//! Observability module for monitoring and metrics.
//!
//! Structured logging goes through `tracing` at the call sites; this module
//! holds the counters behind the `/metrics` endpoint.

pub mod metrics;

pub use metrics::{MetricsSnapshot, MetricsTracker, Timer};
