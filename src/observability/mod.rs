//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging via tracing (logging.rs)
//! - Prometheus metrics exposition (metrics.rs)
//! - Request correlation IDs live in `http::request`

pub mod logging;
pub mod metrics;
