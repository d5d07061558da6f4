use std::collections::HashSet;

use async_trait::async_trait;

use wordfam_interfaces::{normalize_word, Lexicon, SourceResult};

/// In-memory word list. Always answers definitively.
#[derive(Debug, Clone, Default)]
pub struct StaticLexicon {
    name: String,
    words: HashSet<String>,
}

impl StaticLexicon {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::named("static", words)
    }

    pub fn named<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            words: words.into_iter().map(|w| normalize_word(w.as_ref())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl Lexicon for StaticLexicon {
    fn name(&self) -> &str {
        &self.name
    }

    async fn contains(&self, word: &str) -> SourceResult<bool> {
        Ok(self.words.contains(&normalize_word(word)))
    }
}
