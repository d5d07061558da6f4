//! Request and build metrics, recorded as structured log events.

use tracing::info;

/// HTTP surface metrics
pub struct ServerMetrics;

impl ServerMetrics {
    /// Record HTTP request
    pub fn record_http_request(path: &str, method: &str, status_code: u16, duration_ms: f64) {
        info!(
            target: "wordfam::metrics",
            path, method, status_code, duration_ms, "HTTP request"
        );
    }
}

/// Engine metrics
pub struct FamilyMetrics;

impl FamilyMetrics {
    /// Record one family request; `nodes` is absent when the build failed
    pub fn record_family_request(word: &str, nodes: Option<usize>, duration_ms: f64) {
        info!(
            target: "wordfam::metrics",
            word,
            nodes = nodes.unwrap_or(0),
            success = nodes.is_some(),
            duration_ms,
            "Family request"
        );
    }
}
