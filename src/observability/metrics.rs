//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, protocol
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_validator_failures_total` (counter): fail-closed validator
//!   outcomes by reason (error, timeout)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
///
/// Exporter failures are logged, not fatal; the gateway serves traffic
/// without metrics rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(error) => tracing::error!(%error, "Failed to start metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, protocol: &'static str, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "protocol" => protocol
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "protocol" => protocol
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a fail-closed validator outcome.
pub fn record_validator_failure(reason: &'static str) {
    metrics::counter!("gateway_validator_failures_total", "reason" => reason).increment(1);
}
