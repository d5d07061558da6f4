//! Server implementation for WordFam
//!
//! Holds the family builder and runs the HTTP listener.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use wordfam_core::{configured_sources, CacheConfig, FamilyBuilder, GraphCache};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct WordFamServer {
    pub config: ServerConfig,
    builder: FamilyBuilder,
}

impl std::fmt::Debug for WordFamServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordFamServer")
            .field("config", &self.config)
            .field("sources", &self.builder.source_names())
            .field("cache_entries", &self.builder.cache().len())
            .finish()
    }
}

impl WordFamServer {
    pub fn new(config: ServerConfig, builder: FamilyBuilder) -> Self {
        Self { config, builder }
    }

    /// Wires the sources and the cache described by the configuration
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let sources = configured_sources(&config.family)?;
        let cache = Arc::new(GraphCache::new(CacheConfig::from(&config.family)));
        let builder = FamilyBuilder::new(config.family.clone(), sources, cache);
        Ok(Self::new(config, builder))
    }

    pub fn builder(&self) -> &FamilyBuilder {
        &self.builder
    }

    pub async fn run(self) -> ServerResult<()> {
        info!(
            sources = ?self.builder.source_names(),
            cache_ttl_secs = self.config.family.cache_ttl_secs,
            coalesce_in_flight = self.config.family.coalesce_in_flight,
            "Starting WordFam server"
        );

        let app = crate::api::build_router(Arc::new(self.clone()));

        let listener = TcpListener::bind(self.config.socket_address()).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
