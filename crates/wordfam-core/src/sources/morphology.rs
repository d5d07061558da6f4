use async_trait::async_trait;
use tracing::{debug, instrument};

use wordfam_interfaces::{CandidateSource, CandidateWord, SourceResult, SourceType};

use crate::morphology::{morphological_family, FormRelation};

/// Reliability weight of rule-generated forms
pub const MORPHOLOGY_CONFIDENCE: f64 = 0.9;

/// Local morphological analyzer: base forms and generated variants.
///
/// Never fails and needs no network; its output is over-generated and relies
/// on validation downstream.
#[derive(Debug, Clone, Default)]
pub struct MorphologySource;

impl MorphologySource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CandidateSource for MorphologySource {
    fn name(&self) -> &str {
        "morphology"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Morphological
    }

    #[instrument(skip(self), fields(source = "morphology"))]
    async fn fetch(&self, word: &str) -> SourceResult<Vec<CandidateWord>> {
        let candidates: Vec<CandidateWord> = morphological_family(word)
            .into_iter()
            .map(|form| {
                let candidate = CandidateWord::new(
                    form.text,
                    SourceType::Morphological,
                    form.score,
                    MORPHOLOGY_CONFIDENCE,
                );
                match (form.relation, form.derived_from) {
                    (FormRelation::BaseForm { .. }, Some(parent)) => candidate.related_to(parent),
                    _ => candidate,
                }
            })
            .collect();

        debug!(forms = candidates.len(), "Generated morphological forms");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_run_variants() {
        let candidates = MorphologySource::new().fetch("run").await.unwrap();
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert!(texts.contains(&"running"));
        assert!(texts.contains(&"runner"));
        assert!(candidates.iter().all(|c| c.source_type == SourceType::Morphological));
        assert!(candidates.iter().all(|c| c.related_to.is_none()));
    }

    #[tokio::test]
    async fn test_fetch_links_base_form_chain() {
        let candidates = MorphologySource::new().fetch("additionally").await.unwrap();
        let addition = candidates.iter().find(|c| c.text == "addition").unwrap();
        assert_eq!(addition.related_to.as_deref(), Some("additional"));
    }
}
