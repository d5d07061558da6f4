//! Error types for the word family engine

use thiserror::Error;

/// Errors surfaced by [`crate::FamilyBuilder::build_family`].
///
/// Individual source failures never show up here; they are absorbed at the
/// gather point and reported through the graph metadata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FamilyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal engine error: {0}")]
    Internal(String),
}

impl FamilyError {
    /// Short machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            FamilyError::InvalidInput(_) => "ERR_INVALID_INPUT",
            FamilyError::UpstreamUnavailable(_) => "ERR_UPSTREAM_UNAVAILABLE",
            FamilyError::Internal(_) => "ERR_INTERNAL",
        }
    }
}

/// Result alias used across the engine
pub type FamilyResult<T> = Result<T, FamilyError>;
