//! Semantic neighbors by embedding similarity

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use wordfam_interfaces::{CandidateSource, CandidateWord, SourceResult, SourceType};

use crate::embedding::{cosine_similarity, EmbeddingGenerator};

/// Reliability weight of embedding neighbors
pub const SEMANTIC_CONFIDENCE: f64 = 1.0;

const DEFAULT_TOP_K: usize = 15;

/// Common English words compared against the root
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "run", "running", "ran", "runner", "runs",
    "walk", "walking", "walked", "walker",
    "act", "action", "acting", "actor", "active",
    "create", "creation", "creative", "creator",
    "think", "thinking", "thought", "thinker",
    "write", "writing", "written", "writer",
    "read", "reading", "reader",
    "play", "playing", "player", "played",
    "work", "working", "worker", "worked",
    "build", "building", "builder", "built",
    "teach", "teaching", "teacher", "taught",
    "learn", "learning", "learner", "learned",
    "help", "helping", "helper", "helped",
    "move", "moving", "movement", "moved",
    "change", "changing", "changed",
    "grow", "growing", "growth", "grown",
];

/// Ranks a fixed vocabulary by cosine similarity to the root.
///
/// Vocabulary embeddings are computed on first use and reused for the life
/// of the source; only the root is embedded per request.
pub struct EmbeddingSimilaritySource {
    generator: Arc<dyn EmbeddingGenerator>,
    vocabulary: Vec<String>,
    vocabulary_embeddings: OnceCell<Vec<Vec<f32>>>,
    min_similarity: f64,
    top_k: usize,
}

impl EmbeddingSimilaritySource {
    pub fn new(generator: Arc<dyn EmbeddingGenerator>, min_similarity: f64) -> Self {
        Self::with_vocabulary(generator, DEFAULT_VOCABULARY.iter().copied(), min_similarity)
    }

    pub fn with_vocabulary<I, S>(generator: Arc<dyn EmbeddingGenerator>, vocabulary: I, min_similarity: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = Vec::new();
        for word in vocabulary {
            let word = word.into().trim().to_lowercase();
            if !word.is_empty() && !words.contains(&word) {
                words.push(word);
            }
        }
        Self {
            generator,
            vocabulary: words,
            vocabulary_embeddings: OnceCell::new(),
            min_similarity,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    async fn vocabulary_embeddings(&self) -> SourceResult<&Vec<Vec<f32>>> {
        self.vocabulary_embeddings
            .get_or_try_init(|| async {
                let embeddings = self.generator.generate_embeddings(&self.vocabulary).await?;
                info!(words = embeddings.len(), "Embedded similarity vocabulary");
                Ok(embeddings)
            })
            .await
    }
}

#[async_trait]
impl CandidateSource for EmbeddingSimilaritySource {
    fn name(&self) -> &str {
        "embedding"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Semantic
    }

    #[instrument(skip(self), fields(source = "embedding"))]
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>> {
        let vocabulary_embeddings = self.vocabulary_embeddings().await?;
        let root_embedding = self.generator.generate_embedding(word).await?;

        let mut neighbors: Vec<(&str, f64)> = self
            .vocabulary
            .iter()
            .zip(vocabulary_embeddings)
            .filter(|(candidate, _)| candidate.as_str() != word)
            .map(|(candidate, embedding)| (candidate.as_str(), cosine_similarity(&root_embedding, embedding)))
            .filter(|(_, similarity)| *similarity >= self.min_similarity)
            .collect();

        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        neighbors.truncate(self.top_k);
        debug!(neighbors = neighbors.len(), "Ranked semantic neighbors");

        Ok(neighbors
            .into_iter()
            .map(|(text, similarity)| {
                CandidateWord::new(text, SourceType::Semantic, similarity.clamp(0.0, 1.0), SEMANTIC_CONFIDENCE)
            })
            .collect())
    }
}
