//! Error types for the WordFam server

use thiserror::Error;

use wordfam_core::FamilyError;
use wordfam_interfaces::SourceError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the family engine
    #[error(transparent)]
    Family(#[from] FamilyError),

    /// A source could not be constructed
    #[error("Source setup error: {0}")]
    SourceSetup(#[from] SourceError),

    /// Socket or other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
