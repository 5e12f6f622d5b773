//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_submissions_total` (counter): submissions by outcome
//! - `relay_upstream_duration_seconds` (histogram): record store latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// How a `POST /submit` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Relayed,
    Failed,
    Bot,
    Invalid,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Relayed => "relayed",
            Outcome::Failed => "failed",
            Outcome::Bot => "bot",
            Outcome::Invalid => "invalid",
        }
    }
}

/// Start the Prometheus scrape endpoint and install the global recorder.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: Outcome) {
    counter!("relay_submissions_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_upstream_duration(started: Instant) {
    histogram!("relay_upstream_duration_seconds").record(started.elapsed().as_secs_f64());
}
