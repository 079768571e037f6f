//! Console metrics.
//!
//! # Metrics
//! - `console_fetch_total` (counter): backend list fetches by outcome
//! - `console_gate_trips_total` (counter): failure gate trips by error kind
//! - `console_mutations_total` (counter): add/remove requests by outcome
//! - `console_stale_results_total` (counter): fetch results outdated by a newer fetch

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::client::mutation::MutationKind;

/// Serve Prometheus metrics on `addr`. Must run inside the tokio runtime.
pub fn install_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count one backend list fetch by outcome.
pub fn record_fetch(outcome: &'static str) {
    counter!("console_fetch_total", "outcome" => outcome).increment(1);
}

/// Count a failure gate trip by error kind.
pub fn record_gate_trip(kind: &'static str) {
    counter!("console_gate_trips_total", "kind" => kind).increment(1);
}

/// Count one add or remove request by outcome.
pub fn record_mutation(kind: MutationKind, outcome: &'static str) {
    let kind = match kind {
        MutationKind::Add => "add",
        MutationKind::Remove => "remove",
    };
    counter!("console_mutations_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_stale_result() {
    counter!("console_stale_results_total").increment(1);
}
