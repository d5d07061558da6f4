//! Datamuse word service adapters
//!
//! One client, three roles: spelling-pattern derivations, synonym/means-like
//! associations, and exact-spelling word lookup.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use wordfam_interfaces::{CandidateSource, CandidateWord, Lexicon, SourceResult, SourceType};

use super::{build_http_client, decode_json, map_http_error};
use crate::morphology::match_derivation;

/// Datamuse scores are unbounded rank weights; this maps them into `[0, 1]`
const SCORE_SCALE: f64 = 100_000.0;

/// Reliability weight of spelling-pattern derivations
pub const DERIVATION_CONFIDENCE: f64 = 1.0;

/// Reliability weight of Datamuse associations
pub const ASSOCIATION_CONFIDENCE: f64 = 0.95;

const MAX_DERIVATIONS: usize = 30;
const DEFAULT_MAX_ASSOCIATIONS: usize = 20;

/// A single Datamuse hit
#[derive(Debug, Clone, Deserialize)]
pub struct DatamuseWord {
    pub word: String,
    #[serde(default)]
    pub score: Option<f64>,
}

impl DatamuseWord {
    fn normalized_score(&self) -> f64 {
        (self.score.unwrap_or(0.0) / SCORE_SCALE).clamp(0.0, 1.0)
    }
}

/// Client for the Datamuse `/words` endpoint
#[derive(Debug, Clone)]
pub struct DatamuseClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl DatamuseClient {
    /// Creates a client against `base_url` (e.g. `https://api.datamuse.com`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
            timeout,
        })
    }

    /// Runs one `/words` query
    pub async fn words(&self, params: &[(&str, String)]) -> SourceResult<Vec<DatamuseWord>> {
        let url = format!("{}/words", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| map_http_error(e, self.timeout))?;
        decode_json(response).await
    }

    /// Runs several queries concurrently.
    ///
    /// Returns the successful result lists in query order; fails only when
    /// every query failed.
    async fn words_many(&self, queries: Vec<Vec<(&str, String)>>) -> SourceResult<Vec<Vec<DatamuseWord>>> {
        let results = join_all(queries.iter().map(|q| self.words(q))).await;

        let mut lists = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(list) => lists.push(list),
                Err(e) => {
                    debug!(error = %e, "Datamuse query failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match (lists.is_empty(), first_error) {
            (true, Some(error)) => Err(error),
            _ => Ok(lists),
        }
    }
}

/// Derivations found through Datamuse spelling patterns.
///
/// Spelling matches are kept only when they decompose around the root into a
/// recognized affix pattern.
pub struct DatamuseDerivationSource {
    client: DatamuseClient,
}

impl DatamuseDerivationSource {
    pub fn new(client: DatamuseClient) -> Self {
        Self { client }
    }

    fn spelling_queries(word: &str) -> Vec<Vec<(&'static str, String)>> {
        [
            (format!("{}*", word), 30),
            (format!("*{}", word), 25),
            (format!("*{}*", word), 40),
            (format!("re{}*", word), 10),
            (format!("*{}ion", word), 15),
            (format!("*{}ive", word), 15),
            (format!("*{}or", word), 10),
            (format!("*{}ual", word), 10),
        ]
        .into_iter()
        .map(|(pattern, max)| vec![("sp", pattern), ("max", max.to_string())])
        .collect()
    }
}

#[async_trait]
impl CandidateSource for DatamuseDerivationSource {
    fn name(&self) -> &str {
        "datamuse-derivation"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Derivation
    }

    #[instrument(skip(self), fields(source = "datamuse-derivation"))]
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>> {
        let lists = self.client.words_many(Self::spelling_queries(word)).await?;

        let mut seen: Vec<String> = Vec::new();
        let mut candidates = Vec::new();
        for hit in lists.into_iter().flatten() {
            let text = hit.word.trim().to_lowercase();
            if text == word || seen.contains(&text) {
                continue;
            }
            seen.push(text.clone());

            if let Some(pattern) = match_derivation(&text, word) {
                candidates.push(CandidateWord::new(
                    text,
                    SourceType::Derivation,
                    pattern.derivation_confidence(),
                    DERIVATION_CONFIDENCE,
                ));
            }
        }

        candidates.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
        candidates.truncate(MAX_DERIVATIONS);
        debug!(spellings = seen.len(), kept = candidates.len(), "Filtered spelling matches");
        Ok(candidates)
    }
}

/// Synonyms (`rel_syn`) followed by means-like words (`ml`), in Datamuse order
pub struct DatamuseAssociationSource {
    client: DatamuseClient,
    max_results: usize,
}

impl DatamuseAssociationSource {
    pub fn new(client: DatamuseClient) -> Self {
        Self {
            client,
            max_results: DEFAULT_MAX_ASSOCIATIONS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

#[async_trait]
impl CandidateSource for DatamuseAssociationSource {
    fn name(&self) -> &str {
        "datamuse-association"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Synonym
    }

    #[instrument(skip(self), fields(source = "datamuse-association"))]
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>> {
        let queries = vec![
            vec![("rel_syn", word.to_string()), ("max", "20".to_string())],
            vec![("ml", word.to_string()), ("max", "30".to_string())],
        ];
        let lists = self.client.words_many(queries).await?;

        let mut candidates: Vec<CandidateWord> = Vec::new();
        for hit in lists.into_iter().flatten() {
            let text = hit.word.trim().to_lowercase();
            if text.is_empty() || text == word || candidates.iter().any(|c| c.text == text) {
                continue;
            }
            let raw = hit.normalized_score();
            candidates.push(CandidateWord::new(text, SourceType::Synonym, raw, ASSOCIATION_CONFIDENCE));
            if candidates.len() >= self.max_results {
                break;
            }
        }
        Ok(candidates)
    }
}

/// Exact-spelling lookup against Datamuse
pub struct DatamuseLexicon {
    client: DatamuseClient,
}

impl DatamuseLexicon {
    pub fn new(client: DatamuseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Lexicon for DatamuseLexicon {
    fn name(&self) -> &str {
        "datamuse"
    }

    async fn contains(&self, word: &str) -> SourceResult<bool> {
        let hits = self
            .client
            .words(&[("sp", word.to_string()), ("max", "1".to_string())])
            .await
            .map_err(|e| {
                warn!(word = %word, error = %e, "Datamuse lookup failed");
                e
            })?;
        Ok(hits
            .first()
            .map(|hit| hit.word.trim().eq_ignore_ascii_case(word))
            .unwrap_or(false))
    }
}
