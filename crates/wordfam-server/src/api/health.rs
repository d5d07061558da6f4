//! Health check and service descriptor endpoints

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::debug;

use crate::server::WordFamServer;

/// Health check handler
///
/// Reports liveness, the crate version and the result cache counters.
pub async fn health_check(State(server): State<Arc<WordFamServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let metrics = server.builder().cache().metrics();
    Json(json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
        "cache": {
            "entries": metrics.entries,
            "capacity": metrics.capacity,
            "hits": metrics.hits,
            "misses": metrics.misses,
            "expirations": metrics.expirations,
            "evictions": metrics.evictions,
            "hitRatio": metrics.hit_ratio(),
        },
    }))
}

/// Service descriptor served at `/`
pub async fn service_descriptor(State(server): State<Arc<WordFamServer>>) -> impl IntoResponse {
    Json(json!({
        "name": "wordfam",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Word family graphs: derivations, morphological forms, synonyms and semantic neighbors of a root word",
        "endpoints": {
            "family": "GET /api/family?word={word}",
            "health": "GET /health",
        },
        "sources": server.builder().source_names(),
    }))
}
