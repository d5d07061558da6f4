use async_trait::async_trait;
use tracing::instrument;

use wordfam_interfaces::{CandidateSource, CandidateWord, SourceResult, SourceType};

use crate::compounds::{compounds_containing, compounds_for};

/// Reliability weight of curated compounds
pub const COMPOUND_CONFIDENCE: f64 = 1.0;

/// Score given to every curated compound
pub const COMPOUND_SCORE: f64 = 0.80;

/// Compound and phrasal forms from the built-in curated list.
///
/// Lists the compounds filed under the root, then any other curated compound
/// containing it.
#[derive(Debug, Clone, Default)]
pub struct CompoundSource;

impl CompoundSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CandidateSource for CompoundSource {
    fn name(&self) -> &str {
        "compounds"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Compound
    }

    #[instrument(skip(self), fields(source = "compounds"))]
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>> {
        let mut texts: Vec<&'static str> = compounds_for(word).to_vec();
        if word.len() >= 3 {
            for compound in compounds_containing(word) {
                if !texts.contains(&compound) {
                    texts.push(compound);
                }
            }
        }

        Ok(texts
            .into_iter()
            .filter(|t| *t != word)
            .map(|t| CandidateWord::new(t, SourceType::Compound, COMPOUND_SCORE, COMPOUND_CONFIDENCE))
            .collect())
    }
}
