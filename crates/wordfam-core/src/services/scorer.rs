//! Relevance scoring and merge rules
//!
//! Every candidate gets a base score according to its source type, weighted by
//! the reliability of the source that produced it. A word reported by several
//! sources keeps its best score.

use wordfam_interfaces::{CandidateWord, EdgeType, SourceType};

use crate::morphology::affix_confidence;

/// Base score of a curated compound
pub const COMPOUND_BASE_SCORE: f64 = 0.80;

/// Lowest base score of an exact derivational link
pub const MIN_DERIVATION_SCORE: f64 = 0.90;

/// One source's scored opinion on a word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub source_type: SourceType,
    pub score: f64,
}

/// Precedence when two contributions score the same
pub fn edge_priority(edge_type: EdgeType) -> u8 {
    match edge_type {
        EdgeType::Derivation => 3,
        EdgeType::Morphological => 2,
        EdgeType::Synonym => 1,
        EdgeType::Semantic => 0,
    }
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    inclusion_cutoff: f64,
    min_similarity: f64,
}

impl RelevanceScorer {
    pub fn new(inclusion_cutoff: f64, min_similarity: f64) -> Self {
        Self {
            inclusion_cutoff,
            min_similarity,
        }
    }

    pub fn inclusion_cutoff(&self) -> f64 {
        self.inclusion_cutoff
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Semantic candidates below the similarity floor never get a score
    pub fn discard_pre_scoring(&self, candidate: &CandidateWord) -> bool {
        candidate.source_type == SourceType::Semantic
            && (!candidate.raw_score.is_finite() || candidate.raw_score < self.min_similarity)
    }

    /// Score before the source confidence is applied.
    ///
    /// `rank` is the candidate's position in its source's list of `list_len`
    /// entries; only association sources use it.
    pub fn base_score(&self, candidate: &CandidateWord, rank: usize, list_len: usize, root: &str) -> f64 {
        match candidate.source_type {
            SourceType::Derivation => finite_or_zero(candidate.raw_score).clamp(MIN_DERIVATION_SCORE, 1.0),
            SourceType::Morphological => affix_confidence(&candidate.id(), root),
            SourceType::Compound => COMPOUND_BASE_SCORE,
            SourceType::Semantic => finite_or_zero(candidate.raw_score),
            SourceType::Synonym => 1.0 - rank as f64 / (list_len as f64 + 1.0),
        }
    }

    /// Final score of one candidate, in `[0, 1]`, or `None` when the
    /// candidate is discarded before scoring
    pub fn score_candidate(&self, candidate: &CandidateWord, rank: usize, list_len: usize, root: &str) -> Option<f64> {
        if self.discard_pre_scoring(candidate) {
            return None;
        }
        let base = self.base_score(candidate, rank, list_len, root);
        Some((base * finite_or_zero(candidate.source_confidence)).clamp(0.0, 1.0))
    }

    /// Node score and edge type from all contributions for one word: the
    /// highest score wins, ties go to the higher-priority edge type.
    pub fn resolve(&self, contributions: &[Contribution]) -> Option<(f64, EdgeType)> {
        contributions
            .iter()
            .map(|c| (c.score, c.source_type.edge_type()))
            .max_by(|a, b| {
                a.0.total_cmp(&b.0)
                    .then_with(|| edge_priority(a.1).cmp(&edge_priority(b.1)))
            })
    }

    pub fn passes_cutoff(&self, score: f64) -> bool {
        score >= self.inclusion_cutoff
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(0.5, 0.35)
    }

    fn contribution(source_type: SourceType, score: f64) -> Contribution {
        Contribution { source_type, score }
    }

    #[test]
    fn test_synonym_rank_decay() {
        let jog = CandidateWord::new("jog", SourceType::Synonym, 0.0, 1.0);
        let sprint = CandidateWord::new("sprint", SourceType::Synonym, 0.0, 1.0);
        assert_eq!(scorer().score_candidate(&jog, 0, 2, "run"), Some(1.0));
        let second = scorer().score_candidate(&sprint, 1, 2, "run").unwrap();
        assert!((second - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_derivation_clamped_and_weighted() {
        let low = CandidateWord::new("runner", SourceType::Derivation, 0.3, 1.0);
        assert_eq!(scorer().score_candidate(&low, 0, 1, "run"), Some(0.90));

        let weighted = CandidateWord::new("runner", SourceType::Derivation, 1.0, 0.5);
        assert_eq!(scorer().score_candidate(&weighted, 0, 1, "run"), Some(0.5));
    }

    #[test]
    fn test_morphological_and_compound_bases() {
        let runner = CandidateWord::new("runner", SourceType::Morphological, 0.8, 1.0);
        assert_eq!(scorer().score_candidate(&runner, 0, 1, "run"), Some(0.85));

        let unrelated = CandidateWord::new("table", SourceType::Morphological, 0.8, 1.0);
        assert_eq!(scorer().score_candidate(&unrelated, 0, 1, "run"), Some(0.60));

        let compound = CandidateWord::new("runway", SourceType::Compound, 0.3, 1.0);
        assert_eq!(scorer().score_candidate(&compound, 0, 1, "run"), Some(0.80));
    }

    #[test]
    fn test_non_finite_scores_are_zero() {
        let nan = CandidateWord::new("runner", SourceType::Derivation, 1.0, f64::NAN);
        assert_eq!(scorer().score_candidate(&nan, 0, 1, "run"), Some(0.0));
    }

    #[test]
    fn test_semantic_below_min_similarity_discarded() {
        let scorer = RelevanceScorer::new(0.3, 0.35);
        let weak = CandidateWord::new("dash", SourceType::Semantic, 0.32, 1.0);
        let nan = CandidateWord::new("dash", SourceType::Semantic, f64::NAN, 1.0);
        let strong = CandidateWord::new("sprint", SourceType::Semantic, 0.35, 1.0);
        assert_eq!(scorer.score_candidate(&weak, 0, 1, "run"), None);
        assert_eq!(scorer.score_candidate(&nan, 0, 1, "run"), None);
        assert_eq!(scorer.score_candidate(&strong, 0, 1, "run"), Some(0.35));

        // the floor only applies to similarity scores
        let synonym = CandidateWord::new("jog", SourceType::Synonym, 0.1, 1.0);
        assert!(scorer.score_candidate(&synonym, 0, 1, "run").is_some());
    }

    #[test]
    fn test_resolve_takes_max() {
        let resolved = scorer().resolve(&[
            contribution(SourceType::Semantic, 0.6),
            contribution(SourceType::Derivation, 0.9),
        ]);
        assert_eq!(resolved, Some((0.9, EdgeType::Derivation)));
    }

    #[test]
    fn test_resolve_ties_by_priority() {
        let resolved = scorer().resolve(&[
            contribution(SourceType::Semantic, 0.8),
            contribution(SourceType::Synonym, 0.8),
            contribution(SourceType::Compound, 0.8),
        ]);
        assert_eq!(resolved, Some((0.8, EdgeType::Morphological)));
        assert_eq!(scorer().resolve(&[]), None);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        assert!(scorer().passes_cutoff(0.5));
        assert!(!scorer().passes_cutoff(0.4));
    }
}
