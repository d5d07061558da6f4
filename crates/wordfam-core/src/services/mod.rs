//! Core services of the word family engine

pub mod builder;
pub mod gather;
pub mod scorer;
pub mod validator;

// Re-exports
pub use builder::{FamilyBuilder, FamilySources};
pub use gather::{gather, gather_meta, OutcomeStatus, SourceOutcome};
pub use scorer::{edge_priority, Contribution, RelevanceScorer};
pub use validator::{
    basic_form_check, Acceptance, FormError, LexiconAnswer, Rejection, Verdict, WordValidator,
};
