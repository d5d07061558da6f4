//! Monitoring module for the WordFam service: logging setup and request
//! metrics.

use serde::Deserialize;

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogExt};
pub use metrics::{FamilyMetrics, ServerMetrics};

/// Configuration for initializing logging
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Service name recorded on startup
    pub service_name: String,
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info,wordfam_core=debug")
    pub log_filter: String,
    /// JSON output instead of the pretty formatter
    pub enable_json_logging: bool,
    /// Optional file that receives a daily-rotated JSON copy of the logs
    pub log_file: Option<String>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: "wordfam".to_string(),
            log_filter: "info".to_string(),
            enable_json_logging: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MonitoringConfig::default();
        assert_eq!(config.service_name, "wordfam");
        assert_eq!(config.log_filter, "info");
        assert!(!config.enable_json_logging);
        assert!(config.log_file.is_none());
    }
}
