//! Word family endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use wordfam_interfaces::FamilyGraph;
use wordfam_monitoring::{FamilyMetrics, LogExt};

use super::errors::ApiError;
use crate::server::WordFamServer;

/// Query string of `GET /api/family`
#[derive(Debug, Deserialize)]
pub struct FamilyQuery {
    pub word: Option<String>,
}

/// Builds the family graph of `?word=`
#[instrument(skip(server))]
pub async fn get_family(
    State(server): State<Arc<WordFamServer>>,
    Query(query): Query<FamilyQuery>,
) -> Result<Json<FamilyGraph>, ApiError> {
    let word = query
        .word
        .ok_or_else(|| ApiError::BadRequest("Query parameter 'word' is required".to_string()))?;

    let started = Instant::now();
    let result = server
        .builder()
        .build_family(&word)
        .await
        .log_err("Family request failed");
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    FamilyMetrics::record_family_request(&word, result.as_ref().ok().map(|g| g.nodes.len()), elapsed_ms);

    let graph = result?;
    info!(word = %word, nodes = graph.nodes.len(), "Family request served");
    Ok(Json(graph.as_ref().clone()))
}
