//! WordFam Core - word family graph engine
//!
//! Given a root word, queries lexical, morphological and semantic sources
//! concurrently, validates and scores what they propose, and assembles a
//! typed graph of related words.

#![forbid(unsafe_code)]

// Core modules
pub mod cache;
pub mod compounds;
pub mod config;
pub mod data;
pub mod embedding;
pub mod morphology;
pub mod services;
pub mod sources;

// Fixed-response fakes, used by this crate's tests and by dependents
pub mod test_utils;

// Re-export key types for convenient usage
pub use cache::{CacheConfig, CacheMetrics, GraphCache};
pub use config::{EndpointConfig, FamilyConfig};
pub use data::errors::{FamilyError, FamilyResult};
pub use embedding::{create_embedding_generator, EmbeddingConfig, EmbeddingGenerator};
pub use services::{
    basic_form_check, FamilyBuilder, FamilySources, RelevanceScorer, SourceOutcome, Verdict, WordValidator,
};
pub use sources::configured_sources;

pub use wordfam_interfaces::{
    CandidateSource, CandidateWord, Edge, EdgeType, FamilyGraph, Lexicon, MetaSource, Node, SourceError,
    SourceResult, SourceType, WordMeta,
};
