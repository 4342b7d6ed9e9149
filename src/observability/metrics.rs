//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pokedex_requests_total` (counter): requests by route, status
//! - `pokedex_request_duration_seconds` (histogram): latency by route
//! - `pokedex_store_operations_total` (counter): store calls by op, outcome
//! - `pokedex_catalog_lookups_total` (counter): lookups by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "error"
    }
}

/// Record a handled request.
pub fn record_request(route: String, status: u16, start: Instant) {
    metrics::counter!(
        "pokedex_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("pokedex_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a store operation.
pub fn record_store_op(op: &'static str, ok: bool) {
    metrics::counter!(
        "pokedex_store_operations_total",
        "op" => op,
        "outcome" => outcome(ok)
    )
    .increment(1);
}

/// Record a catalog lookup.
pub fn record_catalog_lookup(found: bool) {
    let outcome = if found { "found" } else { "not_found" };
    metrics::counter!("pokedex_catalog_lookups_total", "outcome" => outcome).increment(1);
}
