//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mux_dispatch_total` (counter): dispatches by router and outcome
//!
//! Outcomes are `matched`, `exact`, `type`, `any`, `options` or `rejected`.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Count one dispatch through `router`.
pub fn record_dispatch(router: &'static str, outcome: &'static str) {
    metrics::counter!("mux_dispatch_total", "router" => router, "outcome" => outcome).increment(1);
}

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}
