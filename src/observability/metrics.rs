//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_back_captures_total` (counter): return targets recorded
//! - `redirect_back_ignored_total` (counter): requests skipped by ignore rules
//! - `redirect_back_redirects_total` (counter): redirects issued, by target
//!   (`stored` or `fallback`)
//!
//! # Design Decisions
//! - Thin record_* wrappers so call sites stay one-liners
//! - Recording without an installed exporter is a no-op, so library users
//!   and tests pay nothing

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and exposition endpoint.
///
/// Must run inside a tokio runtime. Failure to install is logged, not fatal:
/// the service keeps running without metrics.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a captured return target.
pub fn record_capture() {
    metrics::counter!("redirect_back_captures_total").increment(1);
}

/// Record a request skipped by the ignore rules.
pub fn record_ignored() {
    metrics::counter!("redirect_back_ignored_total").increment(1);
}

/// Record an issued redirect, labeled by where the target came from.
pub fn record_redirect(target: &'static str) {
    metrics::counter!("redirect_back_redirects_total", "target" => target).increment(1);
}
