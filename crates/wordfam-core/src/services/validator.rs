//! Word validation
//!
//! A candidate becomes a node only if it is attested: found in a lexicon,
//! listed as a curated compound, or (when no lexicon can answer) explained by
//! affix rules applied to an attested stem.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, instrument};

use wordfam_interfaces::{normalize_word, Lexicon};

use crate::compounds::is_curated_compound;
use crate::morphology::{candidate_stems, match_derivation};

/// Longest accepted word, in characters
pub const MAX_WORD_LEN: usize = 50;

/// Stems looked up per word by the affix check
const MAX_STEM_LOOKUPS: usize = 6;

/// Why a word failed the lexical form check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("word must not be empty")]
    Empty,

    #[error("word must be at most {MAX_WORD_LEN} characters")]
    TooLong,

    #[error("word must contain only letters, with optional internal hyphens or apostrophes")]
    InvalidCharacters,
}

fn is_joiner(c: char) -> bool {
    c == '-' || c == '\''
}

/// Letters, with single joiners (and single spaces when `allow_spaces`)
/// strictly between letters.
fn is_well_formed(word: &str, allow_spaces: bool) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let (Some(first), Some(last)) = (chars.first(), chars.last()) else {
        return false;
    };
    if !first.is_alphabetic() || !last.is_alphabetic() {
        return false;
    }
    chars.windows(2).all(|pair| pair[0].is_alphabetic() || pair[1].is_alphabetic())
        && chars
            .iter()
            .all(|c| c.is_alphabetic() || is_joiner(*c) || (allow_spaces && *c == ' '))
}

/// Purely lexical gate for user input.
///
/// Non-empty after trimming, at most [`MAX_WORD_LEN`] characters, letters with
/// optional internal hyphens or apostrophes.
pub fn basic_form_check(word: &str) -> Result<(), FormError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(FormError::Empty);
    }
    if word.chars().count() > MAX_WORD_LEN {
        return Err(FormError::TooLong);
    }
    if !is_well_formed(word, false) {
        return Err(FormError::InvalidCharacters);
    }
    Ok(())
}

/// Why a word was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptance {
    /// A lexicon of this name attests the word
    Lexicon(String),
    /// The word is in the curated compound list
    CuratedCompound,
    /// No lexicon could answer, but affix rules lead to an attested stem
    AffixStem,
}

/// Why a word was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MalformedWord,
    SameAsRoot,
    NotInLexicon,
    NoAttestedStem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(Acceptance),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

/// Combined answer of all lexicons for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconAnswer {
    /// At least one lexicon attests the word
    Found(String),
    /// No lexicon attests it and at least one said so definitively
    Absent,
    /// No lexicon could answer
    Unknown,
}

pub struct WordValidator {
    lexicons: Vec<Arc<dyn Lexicon>>,
    lookup_timeout: Duration,
    concurrency: usize,
}

impl WordValidator {
    pub fn new(lexicons: Vec<Arc<dyn Lexicon>>, lookup_timeout: Duration, concurrency: usize) -> Self {
        Self {
            lexicons,
            lookup_timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Asks every lexicon concurrently, each under the lookup timeout
    pub async fn lookup(&self, word: &str) -> LexiconAnswer {
        let answers = join_all(self.lexicons.iter().map(|lexicon| async move {
            let answer = timeout(self.lookup_timeout, lexicon.contains(word)).await;
            (lexicon.name(), answer)
        }))
        .await;

        let mut definitive = false;
        for (name, answer) in answers {
            match answer {
                Ok(Ok(true)) => return LexiconAnswer::Found(name.to_string()),
                Ok(Ok(false)) => definitive = true,
                Ok(Err(e)) => debug!(lexicon = name, word, error = %e, "Lexicon lookup failed"),
                Err(_) => debug!(lexicon = name, word, "Lexicon lookup timed out"),
            }
        }
        if definitive {
            LexiconAnswer::Absent
        } else {
            LexiconAnswer::Unknown
        }
    }

    /// Whether the root itself is attested by a lexicon or the curated list
    #[instrument(skip(self))]
    pub async fn validate_root(&self, root: &str) -> bool {
        let validated =
            is_curated_compound(root) || matches!(self.lookup(root).await, LexiconAnswer::Found(_));
        debug!(validated, "Root validation finished");
        validated
    }

    /// Affix+stem check: the word decomposes around the root, or one of its
    /// stems is the root or an attested word.
    async fn has_attested_stem(&self, word: &str, root: &str) -> bool {
        if match_derivation(word, root).is_some() || match_derivation(root, word).is_some() {
            return true;
        }
        let stems = candidate_stems(word);
        if stems.iter().any(|stem| stem == root) {
            return true;
        }
        let lookups = stems
            .iter()
            .take(MAX_STEM_LOOKUPS)
            .map(|stem| self.lookup(stem));
        join_all(lookups)
            .await
            .iter()
            .any(|answer| matches!(answer, LexiconAnswer::Found(_)))
    }

    /// Validates one candidate word against the root
    pub async fn validate(&self, word: &str, root: &str) -> Verdict {
        let word = normalize_word(word);
        let curated = is_curated_compound(&word);

        if word.chars().count() > MAX_WORD_LEN || !is_well_formed(&word, curated) {
            return Verdict::Rejected(Rejection::MalformedWord);
        }
        if word == root {
            return Verdict::Rejected(Rejection::SameAsRoot);
        }
        if curated {
            return Verdict::Accepted(Acceptance::CuratedCompound);
        }

        match self.lookup(&word).await {
            LexiconAnswer::Found(name) => Verdict::Accepted(Acceptance::Lexicon(name)),
            LexiconAnswer::Absent => Verdict::Rejected(Rejection::NotInLexicon),
            LexiconAnswer::Unknown => {
                if self.has_attested_stem(&word, root).await {
                    Verdict::Accepted(Acceptance::AffixStem)
                } else {
                    Verdict::Rejected(Rejection::NoAttestedStem)
                }
            }
        }
    }

    /// Validates many words, at most `concurrency` at a time
    #[instrument(skip(self, words), fields(count = words.len()))]
    pub async fn validate_all(&self, words: &[String], root: &str) -> HashMap<String, Verdict> {
        stream::iter(words.iter().cloned())
            .map(|word| async move {
                let verdict = self.validate(&word, root).await;
                debug!(word = %word, ?verdict, "Validated candidate");
                (word, verdict)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }
}
