//!
//! WordFam Server - HTTP surface of the word family engine
//!
//! This module exports all the components of the WordFam server.

/// API module
pub mod api;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Server module
pub mod server;

// Re-export key types
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::WordFamServer;

/// Build the server from configuration and serve until shutdown
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    let server = WordFamServer::from_config(config)?;
    server.run().await
}
