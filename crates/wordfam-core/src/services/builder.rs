//! Family graph orchestration
//!
//! `FamilyBuilder::build_family` runs the whole pipeline for one root word:
//! cache lookup, concurrent source fan-out, merge, validation, scoring, edge
//! assembly and the cache write.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use wordfam_interfaces::{
    normalize_word, CandidateSource, Edge, EdgeType, FamilyGraph, FamilySummary, Lexicon, MetaSource, Node,
    SourceType, SummaryMetadata, WordMeta,
};

use crate::cache::GraphCache;
use crate::config::FamilyConfig;
use crate::data::{FamilyError, FamilyResult};
use crate::services::gather::{gather, gather_meta, SourceOutcome};
use crate::services::scorer::{Contribution, RelevanceScorer};
use crate::services::validator::{basic_form_check, WordValidator};

const MAX_SYNONYMS: usize = 20;
const MAX_MORPHOLOGICAL: usize = 15;
const MAX_SEMANTIC: usize = 15;

type SharedBuild = Shared<BoxFuture<'static, FamilyResult<Arc<FamilyGraph>>>>;

/// The sources a builder consults
#[derive(Clone, Default)]
pub struct FamilySources {
    pub candidates: Vec<Arc<dyn CandidateSource>>,
    pub meta: Vec<Arc<dyn MetaSource>>,
    pub lexicons: Vec<Arc<dyn Lexicon>>,
}

impl FamilySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate_source(mut self, source: Arc<dyn CandidateSource>) -> Self {
        self.candidates.push(source);
        self
    }

    pub fn with_meta_source(mut self, source: Arc<dyn MetaSource>) -> Self {
        self.meta.push(source);
        self
    }

    pub fn with_lexicon(mut self, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicons.push(lexicon);
        self
    }

    /// Names of all candidate sources, in dispatch order
    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates.iter().map(|s| s.name().to_string()).collect()
    }
}

/// A word seen by one or more sources, before validation and scoring
#[derive(Debug)]
struct ProvisionalNode {
    id: String,
    label: String,
    definition: Option<String>,
    contributions: Vec<Contribution>,
    related_to: Vec<(String, EdgeType)>,
}

impl ProvisionalNode {
    fn has_contribution(&self, types: &[SourceType]) -> bool {
        self.contributions.iter().any(|c| types.contains(&c.source_type))
    }
}

#[derive(Debug)]
struct ScoredNode {
    node: ProvisionalNode,
    score: f64,
    edge_type: EdgeType,
}

struct BuilderInner {
    sources: FamilySources,
    validator: WordValidator,
    scorer: RelevanceScorer,
    cache: Arc<GraphCache>,
    config: FamilyConfig,
    in_flight: DashMap<String, SharedBuild>,
}

/// Builds word family graphs.
///
/// Cheap to clone; clones share the sources, the cache and the in-flight
/// table.
#[derive(Clone)]
pub struct FamilyBuilder {
    inner: Arc<BuilderInner>,
}

impl FamilyBuilder {
    pub fn new(config: FamilyConfig, sources: FamilySources, cache: Arc<GraphCache>) -> Self {
        let validator = WordValidator::new(
            sources.lexicons.clone(),
            config.lookup_timeout(),
            config.lookup_concurrency,
        );
        let scorer = RelevanceScorer::new(config.inclusion_cutoff, config.min_similarity);
        Self {
            inner: Arc::new(BuilderInner {
                sources,
                validator,
                scorer,
                cache,
                config,
                in_flight: DashMap::new(),
            }),
        }
    }

    pub fn config(&self) -> &FamilyConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.inner.cache
    }

    pub fn source_names(&self) -> Vec<String> {
        self.inner.sources.candidate_names()
    }

    /// Builds (or fetches from cache) the family graph of `word`.
    ///
    /// Fails with `InvalidInput` before any source is called when the word is
    /// not well formed, and with `UpstreamUnavailable` when every source failed
    /// and the root could not be validated.
    #[instrument(skip(self))]
    pub async fn build_family(&self, word: &str) -> FamilyResult<Arc<FamilyGraph>> {
        basic_form_check(word).map_err(|e| FamilyError::InvalidInput(e.to_string()))?;

        let label = word.trim().to_string();
        let key = normalize_word(&label);

        if let Some(graph) = self.inner.cache.get(&key) {
            info!(word = %key, "Serving family graph from cache");
            return Ok(graph);
        }

        if self.inner.config.coalesce_in_flight {
            return self.build_coalesced(key, label).await;
        }

        let graph = Arc::new(self.inner.build_uncached(&key, &label).await?);
        self.inner.cache.insert(&key, Arc::clone(&graph));
        Ok(graph)
    }

    /// Joins an identical in-flight build or starts a detached one
    async fn build_coalesced(&self, key: String, label: String) -> FamilyResult<Arc<FamilyGraph>> {
        let shared = match self.inner.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) => {
                debug!(word = %key, "Joining in-flight build");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let inner = Arc::clone(&self.inner);
                let task = tokio::spawn(async move {
                    let _slot = InFlightSlot {
                        inner: Arc::clone(&inner),
                        key: key.clone(),
                    };
                    let result = inner.build_uncached(&key, &label).await.map(Arc::new);
                    if let Ok(graph) = &result {
                        inner.cache.insert(&key, Arc::clone(graph));
                    }
                    result
                });
                let build: BoxFuture<'static, FamilyResult<Arc<FamilyGraph>>> = async move {
                    task.await
                        .unwrap_or_else(|e| Err(FamilyError::Internal(format!("build task failed: {}", e))))
                }
                .boxed();
                let shared = build.shared();
                entry.insert(shared.clone());
                shared
            }
        };
        shared.await
    }
}

/// Clears a word's in-flight entry when its build ends, panics included
struct InFlightSlot {
    inner: Arc<BuilderInner>,
    key: String,
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.inner.in_flight.remove(&self.key);
    }
}

impl BuilderInner {
    async fn build_uncached(&self, key: &str, label: &str) -> FamilyResult<FamilyGraph> {
        let started = Instant::now();
        info!(word = %key, sources = self.sources.candidates.len(), "Building family graph");

        let (root_validated, outcomes, meta) = tokio::join!(
            self.validator.validate_root(key),
            gather(&self.sources.candidates, key, self.config.source_timeout()),
            gather_meta(&self.sources.meta, key, self.config.lookup_timeout()),
        );

        let failed_sources: Vec<String> = outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| o.name.clone())
            .collect();

        if failed_sources.len() == outcomes.len() && !root_validated {
            warn!(word = %key, failed = ?failed_sources, "Every source failed and the root is unvalidated");
            return Err(FamilyError::UpstreamUnavailable(format!(
                "all {} sources failed and '{}' could not be validated",
                outcomes.len(),
                key
            )));
        }
        if !failed_sources.is_empty() {
            warn!(word = %key, failed = ?failed_sources, "Building degraded graph");
        }

        let mut provisional = self.merge(&outcomes, key);

        let words: Vec<String> = provisional.keys().cloned().collect();
        let verdicts = self.validator.validate_all(&words, key).await;
        provisional.retain(|id, _| verdicts.get(id).is_some_and(|v| v.is_valid()));
        debug!(word = %key, candidates = words.len(), valid = provisional.len(), "Validated candidates");

        let kept = self.score(provisional);
        let graph = assemble(key, label, kept, meta, &outcomes, root_validated, failed_sources);

        info!(
            word = %key,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built family graph"
        );
        Ok(graph)
    }

    /// Merges every outcome's candidates by normalized text
    fn merge(&self, outcomes: &[SourceOutcome], root: &str) -> BTreeMap<String, ProvisionalNode> {
        let mut nodes: BTreeMap<String, ProvisionalNode> = BTreeMap::new();

        for outcome in outcomes {
            let list_len = outcome.candidates.len();
            for (rank, candidate) in outcome.candidates.iter().enumerate() {
                let id = candidate.id();
                if id.is_empty() || id == root {
                    continue;
                }
                let Some(score) = self.scorer.score_candidate(candidate, rank, list_len, root) else {
                    debug!(word = %id, similarity = candidate.raw_score, "Discarding weak semantic candidate");
                    continue;
                };
                let node = nodes.entry(id.clone()).or_insert_with(|| ProvisionalNode {
                    id,
                    label: candidate.text.trim().to_string(),
                    definition: None,
                    contributions: Vec::new(),
                    related_to: Vec::new(),
                });
                node.contributions.push(Contribution {
                    source_type: candidate.source_type,
                    score,
                });
                if node.definition.is_none() {
                    node.definition = candidate.definition.clone();
                }
                if let Some(related) = &candidate.related_to {
                    node.related_to.push((related.clone(), candidate.source_type.edge_type()));
                }
            }
        }
        nodes
    }

    /// Resolves scores, applies the cutoff and keeps the best `max_nodes - 1`
    fn score(&self, provisional: BTreeMap<String, ProvisionalNode>) -> Vec<ScoredNode> {
        let mut scored: Vec<ScoredNode> = provisional
            .into_values()
            .filter_map(|node| {
                let (score, edge_type) = self.scorer.resolve(&node.contributions)?;
                self.scorer
                    .passes_cutoff(score)
                    .then_some(ScoredNode { node, score, edge_type })
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.node.id.cmp(&b.node.id)));
        scored.truncate(self.config.max_nodes.saturating_sub(1));
        scored
    }
}

fn summary_list(kept: &[ScoredNode], types: &[SourceType], cap: usize) -> Vec<String> {
    kept.iter()
        .filter(|n| n.node.has_contribution(types))
        .take(cap)
        .map(|n| n.node.id.clone())
        .collect()
}

/// Freezes the kept nodes into a graph: root first, then by score
fn assemble(
    root: &str,
    label: &str,
    kept: Vec<ScoredNode>,
    meta: WordMeta,
    outcomes: &[SourceOutcome],
    root_validated: bool,
    failed_sources: Vec<String>,
) -> FamilyGraph {
    let kept_ids: HashSet<&str> = kept.iter().map(|n| n.node.id.as_str()).collect();

    let mut edges: Vec<Edge> = Vec::new();
    let mut seen: HashSet<Edge> = HashSet::new();
    let mut push_edge = |edge: Edge| {
        if edge.source != edge.target && seen.insert(edge.clone()) {
            edges.push(edge);
        }
    };

    for scored in &kept {
        push_edge(Edge {
            source: root.to_string(),
            target: scored.node.id.clone(),
            edge_type: scored.edge_type,
        });
    }
    for scored in &kept {
        for (related, edge_type) in &scored.node.related_to {
            if related != root && kept_ids.contains(related.as_str()) {
                push_edge(Edge {
                    source: related.clone(),
                    target: scored.node.id.clone(),
                    edge_type: *edge_type,
                });
            }
        }
    }

    let contributing: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.contributed())
        .map(|o| o.name.as_str())
        .collect();
    let source = if contributing.is_empty() {
        "none".to_string()
    } else {
        contributing.join("+")
    };

    let summary = FamilySummary {
        synonyms: summary_list(&kept, &[SourceType::Synonym], MAX_SYNONYMS),
        morphological: summary_list(
            &kept,
            &[SourceType::Derivation, SourceType::Morphological, SourceType::Compound],
            MAX_MORPHOLOGICAL,
        ),
        semantic: summary_list(&kept, &[SourceType::Semantic], MAX_SEMANTIC),
        metadata: SummaryMetadata {
            total_words: kept.len() + 1,
            source,
            root_validated,
            failed_sources,
        },
    };

    let mut nodes = Vec::with_capacity(kept.len() + 1);
    nodes.push(Node {
        id: root.to_string(),
        label: label.to_string(),
        score: 1.0,
        definition: meta.definition.clone(),
    });
    nodes.extend(kept.into_iter().map(|scored| Node {
        id: scored.node.id,
        label: scored.node.label,
        score: scored.score,
        definition: scored.node.definition,
    }));

    FamilyGraph {
        nodes,
        edges,
        meta,
        summary,
    }
}
