//! Data source contracts
//!
//! The graph engine aggregates three kinds of upstream collaborators, each
//! behind its own trait so that they can be swapped, faked in tests and run
//! concurrently.

use async_trait::async_trait;
use thiserror::Error;

use crate::family::{CandidateWord, SourceType, WordMeta};

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur when querying a data source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The upstream did not answer within its budget
    #[error("Source timed out after {0}ms")]
    Timeout(u64),

    /// Connection or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status
    #[error("Upstream returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The upstream payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The source is not configured or is disabled
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// Internal source error
    #[error("Internal source error: {0}")]
    Internal(String),
}

impl SourceError {
    /// Check if the error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Timeout(_))
    }
}

/// Contract for a source of related-word candidates
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Contract: Stable name of the source, used in logs and in `metadata.source`.
    fn name(&self) -> &str;

    /// Contract: The kind of evidence this source produces.
    fn source_type(&self) -> SourceType;

    /// Contract: Proposes candidates related to `word`.
    /// - `word`: the normalized root word.
    /// - Returns: the normalized candidate list, possibly empty. `Err` on upstream
    ///   failure; the caller treats an error as "no data from this source".
    /// - Performs no cross-source deduplication or validation.
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>>;
}

/// Contract for a source of root-word metadata (definition, etymology, usage)
#[async_trait]
pub trait MetaSource: Send + Sync {
    /// Contract: Stable name of the source.
    fn name(&self) -> &str;

    /// Contract: Looks up metadata for `word`. Missing fields stay `None`.
    async fn lookup(&self, word: &str) -> SourceResult<WordMeta>;
}

/// Contract for an authoritative word list
#[async_trait]
pub trait Lexicon: Send + Sync {
    /// Contract: Stable name of the lexicon.
    fn name(&self) -> &str;

    /// Contract: Whether `word` is attested.
    /// - Returns: `Ok(true)` / `Ok(false)` for a definitive answer, `Err` when the
    ///   lexicon could not answer.
    async fn contains(&self, word: &str) -> SourceResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let error = SourceError::Status {
            status: 503,
            url: "https://api.datamuse.com/words".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Upstream returned HTTP 503 for https://api.datamuse.com/words"
        );
        assert_eq!(format!("{}", SourceError::Timeout(250)), "Source timed out after 250ms");
    }

    #[test]
    fn test_is_timeout() {
        assert!(SourceError::Timeout(10).is_timeout());
        assert!(!SourceError::Transport("reset".into()).is_timeout());
    }
}
