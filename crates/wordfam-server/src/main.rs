use anyhow::{Context, Result};
use wordfam_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from .env and environment variables
    let config = ServerConfig::load().context("Failed to load configuration")?;

    wordfam_monitoring::init_logging(&config.monitoring_config()).context("Failed to initialize logging")?;

    // Run the server using the library's run function
    wordfam_server::run(config).await.context("Server error")?;

    Ok(())
}
