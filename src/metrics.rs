//! Prometheus metrics for request latency and record mutations.
//!
//! This module provides metrics for:
//! - HTTP request latency per endpoint
//! - Records created, updated and deleted
//! - Rejected requests (validation failures, unknown ids)

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{Result, ServiceError};

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Records created counter metric name.
pub const METRIC_MEDICATIONS_CREATED: &str = "medications_created_total";
/// Records updated counter metric name.
pub const METRIC_MEDICATIONS_UPDATED: &str = "medications_updated_total";
/// Records deleted counter metric name.
pub const METRIC_MEDICATIONS_DELETED: &str = "medications_deleted_total";
/// Validation failures counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "medication_validation_failures_total";
/// Unknown id lookups counter metric name.
pub const METRIC_NOT_FOUND: &str = "medication_not_found_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after a recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_MEDICATIONS_CREATED, "Total number of records created");
    describe_counter!(METRIC_MEDICATIONS_UPDATED, "Total number of records updated");
    describe_counter!(METRIC_MEDICATIONS_DELETED, "Total number of records deleted");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of create requests rejected for missing fields"
    );
    describe_counter!(
        METRIC_NOT_FOUND,
        "Total number of update/delete requests for unknown ids"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServiceError::Metrics(e.to_string()))
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment records created counter.
pub fn inc_medications_created() {
    counter!(METRIC_MEDICATIONS_CREATED).increment(1);
}

/// Increment records updated counter.
pub fn inc_medications_updated() {
    counter!(METRIC_MEDICATIONS_UPDATED).increment(1);
}

/// Increment records deleted counter.
pub fn inc_medications_deleted() {
    counter!(METRIC_MEDICATIONS_DELETED).increment(1);
}

/// Increment validation failures counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

/// Increment unknown id counter.
pub fn inc_not_found() {
    counter!(METRIC_NOT_FOUND).increment(1);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}
