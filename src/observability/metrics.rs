//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by dispatch path, status
//! - `gateway_request_duration_seconds` (histogram): latency by dispatch path
//! - `gateway_probe_failures_total` (counter): failed reachability probes
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::observability::stats::DispatchPath;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(path: DispatchPath, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "path" => path.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "path" => path.as_str())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_probe_failure() {
    counter!("gateway_probe_failures_total").increment(1);
}
