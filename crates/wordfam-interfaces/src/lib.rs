//! WordFam Interfaces
//!
//! This crate provides the types exchanged between the WordFam graph engine,
//! the lexical data sources it aggregates and the HTTP surface that serves the
//! resulting word family graphs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Word family graph data model
pub mod family;

/// Data source contracts
pub mod source;

/// Re-export key types for convenient usage
pub use family::{
    normalize_word, CandidateWord, Edge, EdgeType, FamilyGraph, FamilySummary, Node,
    SourceType, SummaryMetadata, WordMeta,
};
pub use source::{CandidateSource, Lexicon, MetaSource, SourceError, SourceResult};
