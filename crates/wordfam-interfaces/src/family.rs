//! Word family graph data model
//!
//! These are the types that flow out of the graph engine: the ephemeral
//! [`CandidateWord`] proposed by a single source, and the frozen
//! [`FamilyGraph`] (nodes, typed edges, metadata) returned to clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalizes a word into its node id form: trimmed and lowercased.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// The kind of evidence a source produced for a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Derivationally linked form from a lexical database
    Derivation,
    /// Synonym or strong association
    Synonym,
    /// Neighbor in embedding space
    Semantic,
    /// Inflectional or derivational variant from morphological analysis
    Morphological,
    /// Curated compound or phrasal form
    Compound,
}

impl SourceType {
    /// The edge type a candidate of this source type produces.
    ///
    /// Compounds have no edge type of their own and are drawn as
    /// morphological relations.
    pub fn edge_type(self) -> EdgeType {
        match self {
            SourceType::Derivation => EdgeType::Derivation,
            SourceType::Synonym => EdgeType::Synonym,
            SourceType::Semantic => EdgeType::Semantic,
            SourceType::Morphological | SourceType::Compound => EdgeType::Morphological,
        }
    }

    /// Lowercase name used in logs and metadata
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Derivation => "derivation",
            SourceType::Synonym => "synonym",
            SourceType::Semantic => "semantic",
            SourceType::Morphological => "morphological",
            SourceType::Compound => "compound",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship type of a graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Synonym or association
    Synonym,
    /// Morphological variant or compound
    Morphological,
    /// Embedding-based semantic neighbor
    Semantic,
    /// Derivational relation
    Derivation,
}

impl EdgeType {
    /// Lowercase name used in logs and metadata
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Synonym => "synonym",
            EdgeType::Morphological => "morphological",
            EdgeType::Semantic => "semantic",
            EdgeType::Derivation => "derivation",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word proposed by exactly one source call. Unvalidated and unscored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWord {
    /// Word text as reported by the source
    pub text: String,

    /// Kind of evidence behind this candidate
    pub source_type: SourceType,

    /// Source-specific score (rank score, similarity, pattern confidence)
    pub raw_score: f64,

    /// Reliability weight of the producing source
    pub source_confidence: f64,

    /// Optional short definition supplied by the source
    pub definition: Option<String>,

    /// Normalized id of another word this candidate was reported as related to,
    /// when the relation is not (only) to the root
    pub related_to: Option<String>,
}

impl CandidateWord {
    /// Creates a candidate with no definition and no pairwise relation
    pub fn new(
        text: impl Into<String>,
        source_type: SourceType,
        raw_score: f64,
        source_confidence: f64,
    ) -> Self {
        Self {
            text: text.into(),
            source_type,
            raw_score,
            source_confidence,
            definition: None,
            related_to: None,
        }
    }

    /// Attaches a definition
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Records an explicit relation to another word
    pub fn related_to(mut self, word: impl AsRef<str>) -> Self {
        self.related_to = Some(normalize_word(word.as_ref()));
        self
    }

    /// Normalized id this candidate merges into
    pub fn id(&self) -> String {
        normalize_word(&self.text)
    }
}

/// A word in the family graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Lowercased, trimmed word; unique within a graph
    pub id: String,

    /// Display label, original casing preserved
    pub label: String,

    /// Relevance in `[0, 1]`; the root is always 1.0
    pub score: f64,

    /// Optional short definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

/// A typed relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Relation type
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

/// Definition, etymology and usage of the root word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMeta {
    /// Short definition
    pub definition: Option<String>,

    /// Etymology note
    pub etymology: Option<String>,

    /// Usage example
    pub usage: Option<String>,
}

impl WordMeta {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.definition.is_none() && self.etymology.is_none() && self.usage.is_none()
    }

    /// Fills every empty field from `other`, keeping fields already set
    pub fn fill_missing(&mut self, other: WordMeta) {
        if self.definition.is_none() {
            self.definition = other.definition;
        }
        if self.etymology.is_none() {
            self.etymology = other.etymology;
        }
        if self.usage.is_none() {
            self.usage = other.usage;
        }
    }
}

/// Build metadata reported alongside the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    /// Number of nodes in the graph, root included
    pub total_words: usize,

    /// `+`-joined names of the sources that contributed candidates
    pub source: String,

    /// Whether the root itself was confirmed as a real word
    pub root_validated: bool,

    /// Sources that failed or timed out for this request
    #[serde(default)]
    pub failed_sources: Vec<String>,
}

/// Client-side display groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySummary {
    /// Nodes with synonym evidence
    pub synonyms: Vec<String>,

    /// Nodes with derivation, morphological or compound evidence
    pub morphological: Vec<String>,

    /// Nodes with embedding evidence
    pub semantic: Vec<String>,

    /// Build metadata
    pub metadata: SummaryMetadata,
}

/// A complete, immutable word family graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyGraph {
    /// Nodes, root first
    pub nodes: Vec<Node>,

    /// Typed edges
    pub edges: Vec<Edge>,

    /// Root word metadata
    pub meta: WordMeta,

    /// Display groups and build metadata
    #[serde(flatten)]
    pub summary: FamilySummary,
}

impl FamilyGraph {
    /// Looks up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The root node (always the first node of a built graph)
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Ids of all nodes
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Running "), "running");
        assert_eq!(normalize_word("RUN"), "run");
    }

    #[test]
    fn test_compound_maps_to_morphological_edge() {
        assert_eq!(SourceType::Compound.edge_type(), EdgeType::Morphological);
        assert_eq!(SourceType::Derivation.edge_type(), EdgeType::Derivation);
    }

    #[test]
    fn test_candidate_related_to_is_normalized() {
        let candidate = CandidateWord::new("Add", SourceType::Morphological, 0.9, 1.0)
            .related_to(" Addition ");
        assert_eq!(candidate.id(), "add");
        assert_eq!(candidate.related_to.as_deref(), Some("addition"));
    }

    #[test]
    fn test_word_meta_fill_missing_keeps_existing() {
        let mut meta = WordMeta {
            definition: Some("(verb) move fast".to_string()),
            ..Default::default()
        };
        meta.fill_missing(WordMeta {
            definition: Some("other".to_string()),
            etymology: Some("Old English rinnan".to_string()),
            usage: None,
        });
        assert_eq!(meta.definition.as_deref(), Some("(verb) move fast"));
        assert_eq!(meta.etymology.as_deref(), Some("Old English rinnan"));
        assert!(meta.usage.is_none());
    }

    #[test]
    fn test_family_graph_json_shape() {
        let graph = FamilyGraph {
            nodes: vec![Node {
                id: "run".to_string(),
                label: "Run".to_string(),
                score: 1.0,
                definition: None,
            }],
            edges: vec![],
            meta: WordMeta::default(),
            summary: FamilySummary {
                synonyms: vec!["jog".to_string()],
                morphological: vec![],
                semantic: vec![],
                metadata: SummaryMetadata {
                    total_words: 1,
                    source: "morphology".to_string(),
                    root_validated: true,
                    failed_sources: vec![],
                },
            },
        };

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [{"id": "run", "label": "Run", "score": 1.0}],
                "edges": [],
                "meta": {"definition": null, "etymology": null, "usage": null},
                "synonyms": ["jog"],
                "morphological": [],
                "semantic": [],
                "metadata": {
                    "totalWords": 1,
                    "source": "morphology",
                    "rootValidated": true,
                    "failedSources": []
                }
            })
        );

        let back: FamilyGraph = serde_json::from_value(value).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_edge_type_serializes_as_type() {
        let edge = Edge {
            source: "run".to_string(),
            target: "runner".to_string(),
            edge_type: EdgeType::Derivation,
        };
        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({"source": "run", "target": "runner", "type": "derivation"})
        );
    }
}
