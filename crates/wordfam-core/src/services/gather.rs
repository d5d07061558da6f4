//! Scatter-gather over the configured sources
//!
//! Each source runs in its own timeout boundary. A failure or timeout becomes
//! an empty contribution with a status; it never aborts the other sources.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{timeout, Instant};
use tracing::{info, warn};

use wordfam_interfaces::{CandidateSource, CandidateWord, MetaSource, SourceError, SourceType, WordMeta};

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    Ok,
    Failed(SourceError),
    TimedOut,
}

/// What one source contributed to a build
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub name: String,
    pub source_type: SourceType,
    pub candidates: Vec<CandidateWord>,
    pub status: OutcomeStatus,
    pub elapsed: Duration,
}

impl SourceOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self.status, OutcomeStatus::Ok)
    }

    /// Whether the source answered with at least one candidate
    pub fn contributed(&self) -> bool {
        !self.candidates.is_empty()
    }
}

async fn run_source(source: &dyn CandidateSource, word: &str, budget: Duration) -> SourceOutcome {
    let started = Instant::now();
    let result = timeout(budget, source.fetch(word)).await;
    let elapsed = started.elapsed();

    let (candidates, status) = match result {
        Ok(Ok(candidates)) => {
            info!(source = source.name(), count = candidates.len(), elapsed_ms = elapsed.as_millis() as u64, "Source answered");
            (candidates, OutcomeStatus::Ok)
        }
        Ok(Err(e)) if e.is_timeout() => {
            warn!(source = source.name(), error = %e, "Upstream timed out, continuing without it");
            (Vec::new(), OutcomeStatus::TimedOut)
        }
        Ok(Err(e)) => {
            warn!(source = source.name(), error = %e, "Source failed, continuing without it");
            (Vec::new(), OutcomeStatus::Failed(e))
        }
        Err(_) => {
            warn!(source = source.name(), budget_ms = budget.as_millis() as u64, "Source timed out, continuing without it");
            (Vec::new(), OutcomeStatus::TimedOut)
        }
    };

    SourceOutcome {
        name: source.name().to_string(),
        source_type: source.source_type(),
        candidates,
        status,
        elapsed,
    }
}

/// Queries every source concurrently; outcomes come back in source order
pub async fn gather(sources: &[Arc<dyn CandidateSource>], word: &str, budget: Duration) -> Vec<SourceOutcome> {
    join_all(sources.iter().map(|source| run_source(source.as_ref(), word, budget))).await
}

/// Queries every metadata source concurrently and fills each field from the
/// first source (in configured order) that has it.
pub async fn gather_meta(sources: &[Arc<dyn MetaSource>], word: &str, budget: Duration) -> WordMeta {
    let results = join_all(sources.iter().map(|source| async move {
        (source.name(), timeout(budget, source.lookup(word)).await)
    }))
    .await;

    let mut meta = WordMeta::default();
    for (name, result) in results {
        match result {
            Ok(Ok(found)) => meta.fill_missing(found),
            Ok(Err(e)) => warn!(source = name, error = %e, "Metadata source failed"),
            Err(_) => warn!(source = name, "Metadata source timed out"),
        }
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fakes::{FailingSource, FixedMetaSource, FixedSource};
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn test_gather_isolates_failures_and_timeouts() {
        let sources: Vec<Arc<dyn CandidateSource>> = vec![
            Arc::new(FixedSource::new("fast", SourceType::Synonym).with_word("jog", 0.9)),
            Arc::new(FailingSource::new("broken", SourceType::Derivation)),
            Arc::new(
                FixedSource::new("slow", SourceType::Semantic)
                    .with_word("dash", 0.4)
                    .with_delay(Duration::from_secs(10)),
            ),
        ];

        let outcomes = gather(&sources, "run", Duration::from_secs(1)).await;
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["fast", "broken", "slow"]);

        assert_eq!(outcomes[0].status, OutcomeStatus::Ok);
        assert_eq!(outcomes[0].candidates.len(), 1);
        assert!(matches!(outcomes[1].status, OutcomeStatus::Failed(SourceError::Transport(_))));
        assert_eq!(outcomes[2].status, OutcomeStatus::TimedOut);
        assert!(outcomes[2].candidates.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_timeout_reported_as_timed_out() {
        let sources: Vec<Arc<dyn CandidateSource>> = vec![Arc::new(
            FailingSource::new("datamuse-association", SourceType::Synonym).with_error(SourceError::Timeout(2000)),
        )];

        let outcomes = gather(&sources, "run", Duration::from_secs(5)).await;
        assert_eq!(outcomes[0].status, OutcomeStatus::TimedOut);
        assert!(outcomes[0].is_failure());
    }

    #[tokio::test]
    async fn test_gather_meta_fills_field_wise() {
        let sources: Vec<Arc<dyn MetaSource>> = vec![
            Arc::new(FixedMetaSource::failing("down")),
            Arc::new(FixedMetaSource::new(
                "dictionary",
                WordMeta {
                    definition: Some("(verb) move fast".to_string()),
                    ..Default::default()
                },
            )),
            Arc::new(FixedMetaSource::new(
                "word-data",
                WordMeta {
                    definition: Some("ignored".to_string()),
                    etymology: Some("Old English rinnan".to_string()),
                    usage: None,
                },
            )),
        ];

        let meta = gather_meta(&sources, "run", Duration::from_secs(1)).await;
        assert_eq!(meta.definition.as_deref(), Some("(verb) move fast"));
        assert_eq!(meta.etymology.as_deref(), Some("Old English rinnan"));
        assert_eq!(meta.usage, None);
    }
}
