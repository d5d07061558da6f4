//! API module for the WordFam server
//!
//! This module contains the API routes and handlers.

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod errors;
pub mod family;
pub mod health;
pub mod middleware;

use crate::server::WordFamServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<WordFamServer>) -> Router {
    Router::new()
        .route("/", get(health::service_descriptor))
        .route("/health", get(health::health_check))
        .route("/api/family", get(family::get_family))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::correlation_id_middleware))
        // the visualization client is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(server)
}
