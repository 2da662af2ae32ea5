//! Metrics collection and exposition.
//!
//! # Metrics
//! - `waf_requests_total` (counter): requests by method, status, outcome
//! - `waf_request_duration_seconds` (histogram): latency by outcome
//! - `waf_detections_total` (counter): denials by signature and surface
//! - `waf_upstream_errors_total` (counter): upstream failures by kind
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until a recorder is installed
//! - Prometheus exporter is optional and bound to its own address

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "waf_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
    metrics::histogram!("waf_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a denied request.
pub fn record_detection(signature: &str, surface: &'static str) {
    metrics::counter!(
        "waf_detections_total",
        "signature" => signature.to_string(),
        "surface" => surface,
    )
    .increment(1);
}

/// Record an upstream failure.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("waf_upstream_errors_total", "kind" => kind).increment(1);
}
