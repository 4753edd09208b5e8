//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, origin
//! - `proxy_request_duration_seconds` (histogram): latency by origin

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "proxy_requests_total",
                "Total requests proxied, by method, status, and serving origin"
            );
            describe_histogram!(
                "proxy_request_duration_seconds",
                "Request latency in seconds, by serving origin"
            );
            tracing::info!(address = %addr, "metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, origin: &str, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "origin" => origin.to_string(),
    )
    .increment(1);

    histogram!(
        "proxy_request_duration_seconds",
        "origin" => origin.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}
