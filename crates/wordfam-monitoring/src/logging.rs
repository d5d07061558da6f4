//! Structured logging using tracing.
//!
//! Pretty output for development, JSON for log aggregation, and an optional
//! rotated JSON file.

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use crate::MonitoringConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn file_layer(log_file: &str) -> BoxedLayer {
    let path = Path::new(log_file);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wordfam.log".to_string());

    fmt::layer()
        .json()
        .with_current_span(true)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(RollingFileAppender::new(Rotation::DAILY, directory, file_name))
        .boxed()
}

/// Initialize structured logging.
///
/// `RUST_LOG` takes precedence over `config.log_filter`. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &MonitoringConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_json_logging {
        layers.push(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .pretty()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    }
    if let Some(log_file) = &config.log_file {
        layers.push(file_layer(log_file));
    }

    let subscriber = tracing_subscriber::registry().with(layers).with(env_filter);
    tracing::subscriber::set_global_default(subscriber).context("Failed to set global default subscriber")?;

    info!(
        service_name = %config.service_name,
        log_format = if config.enable_json_logging { "json" } else { "pretty" },
        log_file = ?config.log_file,
        "Logging initialized"
    );

    Ok(())
}

/// Trait to add log context to results
pub trait LogExt<T, E> {
    /// Log error with additional context before returning
    fn log_err(self, message: &str) -> Result<T, E>;

    /// Log success with additional context before returning
    fn log_ok(self, message: &str) -> Result<T, E>;
}

impl<T, E: std::fmt::Display> LogExt<T, E> for Result<T, E> {
    fn log_err(self, message: &str) -> Result<T, E> {
        if let Err(ref e) = self {
            tracing::error!("{}: {}", message, e);
        }
        self
    }

    fn log_ok(self, message: &str) -> Result<T, E> {
        if self.is_ok() {
            tracing::info!("{}", message);
        }
        self
    }
}

/// Installs a test-writer subscriber; later calls are no-ops
pub fn init_test_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .with_test_writer()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_ext_passes_results_through() {
        init_test_tracing();

        let ok: Result<u32, String> = Ok(3);
        assert_eq!(ok.log_ok("built").log_err("never logged"), Ok(3));

        let err: Result<u32, String> = Err("upstream down".to_string());
        assert_eq!(err.log_err("build failed"), Err("upstream down".to_string()));
    }
}
