//! Fake sources with fixed responses for tests.
//!
//! Every fake counts its calls so tests can assert how often an upstream was
//! consulted (e.g. zero calls on a cache hit).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use wordfam_interfaces::{
    CandidateSource, CandidateWord, Lexicon, MetaSource, SourceError, SourceResult, SourceType, WordMeta,
};

use crate::embedding::EmbeddingGenerator;

#[derive(Debug, Default)]
struct CallCounter(AtomicUsize);

impl CallCounter {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Returns the same candidates for every word, optionally after a delay
#[derive(Debug)]
pub struct FixedSource {
    name: String,
    source_type: SourceType,
    candidates: Vec<CandidateWord>,
    delay: Option<Duration>,
    calls: CallCounter,
}

impl FixedSource {
    pub fn new(name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            name: name.into(),
            source_type,
            candidates: Vec::new(),
            delay: None,
            calls: CallCounter::default(),
        }
    }

    /// Adds a candidate with source confidence 1.0
    pub fn with_word(self, text: &str, raw_score: f64) -> Self {
        let candidate = CandidateWord::new(text, self.source_type, raw_score, 1.0);
        self.with_candidate(candidate)
    }

    pub fn with_candidate(mut self, candidate: CandidateWord) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Answers only after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl CandidateSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn fetch(&self, _word: &str) -> SourceResult<Vec<CandidateWord>> {
        self.calls.hit();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.candidates.clone())
    }
}

/// Always fails, with a transport error unless told otherwise
#[derive(Debug)]
pub struct FailingSource {
    name: String,
    source_type: SourceType,
    error: Option<SourceError>,
    calls: CallCounter,
}

impl FailingSource {
    pub fn new(name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            name: name.into(),
            source_type,
            error: None,
            calls: CallCounter::default(),
        }
    }

    pub fn with_error(mut self, error: SourceError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait]
impl CandidateSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn fetch(&self, _word: &str) -> SourceResult<Vec<CandidateWord>> {
        self.calls.hit();
        Err(self
            .error
            .clone()
            .unwrap_or_else(|| SourceError::Transport(format!("{} is down", self.name))))
    }
}

/// Metadata source answering the same meta for every word
#[derive(Debug)]
pub struct FixedMetaSource {
    name: String,
    meta: SourceResult<WordMeta>,
    calls: CallCounter,
}

impl FixedMetaSource {
    pub fn new(name: impl Into<String>, meta: WordMeta) -> Self {
        Self {
            name: name.into(),
            meta: Ok(meta),
            calls: CallCounter::default(),
        }
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: Err(SourceError::Unavailable("meta source down".to_string())),
            calls: CallCounter::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait]
impl MetaSource for FixedMetaSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, _word: &str) -> SourceResult<WordMeta> {
        self.calls.hit();
        self.meta.clone()
    }
}

/// Lexicon that can never answer
#[derive(Debug, Default)]
pub struct FailingLexicon {
    calls: CallCounter,
}

impl FailingLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait]
impl Lexicon for FailingLexicon {
    fn name(&self) -> &str {
        "failing"
    }

    async fn contains(&self, _word: &str) -> SourceResult<bool> {
        self.calls.hit();
        Err(SourceError::Transport("lexicon unreachable".to_string()))
    }
}

/// Embedding generator backed by a fixed word-to-vector table.
///
/// Unknown words are an error.
#[derive(Debug, Default)]
pub struct FixedEmbeddingGenerator {
    vectors: HashMap<String, Vec<f32>>,
    calls: CallCounter,
}

impl FixedEmbeddingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(word.to_string(), vector);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait]
impl EmbeddingGenerator for FixedEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> SourceResult<Vec<f32>> {
        self.calls.hit();
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| SourceError::Internal(format!("no embedding for '{}'", text)))
    }
}
