//! Metrics collection and Prometheus export.
//!
//! The HTTP-level counters come from `service_core::middleware::metrics`;
//! this module adds relay-specific series and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Call once at startup, before any metrics are recorded. Tests skip this and
/// metric calls become no-ops.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_relay_outcome(route: &'static str, outcome: &'static str) {
    counter!("relay_requests_total", "route" => route, "outcome" => outcome).increment(1);
}

pub fn record_generation_latency(route: &'static str, elapsed: Duration) {
    histogram!("relay_generation_duration_seconds", "route" => route)
        .record(elapsed.as_secs_f64());
}

pub fn record_tokens(route: &'static str, input: i32, output: i32) {
    counter!("relay_tokens_total", "route" => route, "type" => "input")
        .increment(input.max(0) as u64);
    counter!("relay_tokens_total", "route" => route, "type" => "output")
        .increment(output.max(0) as u64);
}
