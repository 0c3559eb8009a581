//! Caretide, a degraded-mode health advisory server.
//!
//! Serves medication, vital-sign and risk-assessment endpoints. When
//! the external AI advisor is configured and reachable its answers are
//! passed through; otherwise a local rule-based engine produces a
//! conservative fallback, and responses carry a `service_status:
//! "fallback"` marker so clients can surface the degradation.

pub mod advisor;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod upstream;
