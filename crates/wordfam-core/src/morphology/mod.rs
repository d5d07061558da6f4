//! Rule-based English morphology.
//!
//! No dictionary is consulted here: the analyzer over-generates and leaves it
//! to the validator to drop forms that are not real words.

pub mod affixes;
pub mod variants;

pub use affixes::{affix_confidence, candidate_stems, match_derivation, AffixPattern};
pub use variants::{generate_variants, prefix_chain, strip_prefix, strip_suffix, suffix_chain};

/// Maximum number of forms returned for one word
pub const MAX_FORMS: usize = 20;

/// How a form relates to the analyzed word
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormRelation {
    /// Obtained by stripping affixes; `depth` counts the layers removed
    BaseForm { depth: usize },
    /// Generated inflection or derivation
    Variant,
}

/// A word form produced by [`morphological_family`]
#[derive(Debug, Clone, PartialEq)]
pub struct MorphForm {
    pub text: String,
    pub relation: FormRelation,
    pub score: f64,
    /// The intermediate form this one was stripped from, when not the analyzed word itself
    pub derived_from: Option<String>,
}

fn base_form_score(depth: usize) -> f64 {
    (0.95 - (depth.saturating_sub(1)) as f64 * 0.05).max(0.80)
}

/// Base forms (suffix chain, then prefix chain) followed by generated variants,
/// deduplicated and capped at [`MAX_FORMS`].
pub fn morphological_family(word: &str) -> Vec<MorphForm> {
    let mut forms: Vec<MorphForm> = Vec::new();
    let seen = |forms: &[MorphForm], text: &str| text == word || forms.iter().any(|f| f.text == text);

    for chain in [suffix_chain(word), prefix_chain(word)] {
        let mut parent: Option<String> = None;
        for (i, base) in chain.into_iter().enumerate() {
            let depth = i + 1;
            if base.len() > 2 && !seen(&forms, &base) {
                forms.push(MorphForm {
                    text: base.clone(),
                    relation: FormRelation::BaseForm { depth },
                    score: base_form_score(depth),
                    derived_from: parent.clone(),
                });
            }
            parent = Some(base);
        }
    }

    for variant in generate_variants(word) {
        if variant.len() > 2 && !seen(&forms, &variant) {
            forms.push(MorphForm {
                text: variant,
                relation: FormRelation::Variant,
                score: 0.80,
                derived_from: None,
            });
        }
    }

    forms.truncate(MAX_FORMS);
    forms
}
