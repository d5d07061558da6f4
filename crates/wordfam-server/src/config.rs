//! Configuration for the WordFam server
//!
//! This module contains the configuration types and loading functionality.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use wordfam_core::FamilyConfig;
use wordfam_monitoring::MonitoringConfig;

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON logs
    #[serde(default)]
    pub log_json: bool,

    /// Optional rotated log file
    #[serde(default)]
    pub log_file: Option<String>,

    /// Engine configuration
    #[serde(default)]
    pub family: FamilyConfig,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            log_level: default_log_level(),
            log_json: false,
            log_file: None,
            family: FamilyConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env` and environment variables
    pub fn load() -> ServerResult<Self> {
        dotenv::dotenv().ok();

        let mut config = Self {
            family: FamilyConfig::load(),
            ..Self::default()
        };

        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            } else {
                warn!("Invalid SERVER_PORT value: {}", port);
            }
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Ok(log_json) = env::var("LOG_JSON") {
            if let Ok(log_json) = log_json.parse::<bool>() {
                config.log_json = log_json;
            } else {
                warn!("Invalid LOG_JSON value: {}", log_json);
            }
        }

        if let Ok(log_file) = env::var("LOG_FILE") {
            config.log_file = Some(log_file).filter(|f| !f.trim().is_empty());
        }

        config.validate()?;
        info!("Loaded server configuration for {}", config.socket_address());
        Ok(config)
    }

    /// Checks settings that cannot be corrected silently
    pub fn validate(&self) -> ServerResult<()> {
        if self.bind_address.trim().is_empty() {
            return Err(ServerError::ConfigError("SERVER_HOST must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Logging settings for the monitoring crate
    pub fn monitoring_config(&self) -> MonitoringConfig {
        MonitoringConfig {
            service_name: "wordfam-server".to_string(),
            log_filter: self.log_level.clone(),
            enable_json_logging: self.log_json,
            log_file: self.log_file.clone(),
        }
    }
}
