//! Affix tables and derivational pattern matching.
//!
//! Shared by the derivation source (to keep only real derivations among
//! spelling matches), the validator (affix+stem check) and the scorer
//! (fuzzy stem confidence).

/// Inflectional and derivational suffixes stripped during analysis
pub const SUFFIXES: &[&str] = &[
    "ing", "ed", "er", "est", "s", "es", "tion", "sion", "ment", "ness", "ity", "ty", "ly",
    "al", "ous", "ive", "ful", "less", "able", "ible", "ant", "ent", "ence", "ance", "y", "en",
    "ize", "ise", "ate",
];

/// Prefixes stripped during analysis
pub const PREFIXES: &[&str] = &[
    "un", "re", "in", "im", "il", "ir", "dis", "en", "em", "non", "over", "mis", "sub", "pre",
    "inter", "fore", "de", "trans", "super", "semi", "anti", "mid", "under", "pseudo",
];

/// Suffixes that may directly follow the root in a derivation
const DERIVATIONAL_SUFFIXES: &[&str] = &[
    "ion", "ions", "or", "ors", "er", "ers", "ing", "ed", "s", "es", "ive", "ives", "ity",
    "ities", "al", "ual", "ation", "ations", "tion", "tions", "ness", "ly", "ment", "ments",
    "ance", "ence", "able", "ible", "ant", "ent", "ency", "ancy", "ually",
];

/// Prefixes that may directly precede the root in a derivation
const DERIVATIONAL_PREFIXES: &[&str] = &[
    "re", "un", "dis", "trans", "inter", "over", "under", "pre", "post", "anti", "de", "mis",
    "non", "sub", "super", "counter", "ex", "in", "co", "en", "pro", "fore", "out",
];

/// Prefixes accepted when the root sits inside the word
const BOUND_PREFIXES: &[&str] = &[
    "trans", "inter", "re", "counter", "over", "under", "sub", "super", "circum", "extra",
    "intra", "retro", "contra", "co", "multi", "semi", "bi", "tri", "uni", "pre", "post",
    "anti", "de", "mis", "non", "pro", "con", "ex", "auto", "hyper", "hypo", "macro", "micro",
    "neo", "para", "pseudo", "quasi", "ultra", "meta",
];

/// Suffixes accepted when the root sits inside the word
const BOUND_SUFFIXES: &[&str] = &[
    "ion", "ions", "tion", "tions", "ation", "ations", "ing", "ed", "or", "ors", "er", "ers",
    "ive", "ives", "ual", "ually", "s", "es", "al", "ally", "ment", "ments", "ness", "less",
    "ful", "able", "ible", "ant", "ent", "ence", "ance", "ency", "ancy", "ity", "ities", "ly",
    "ize", "ise", "ate", "ous", "eous", "ious",
];

/// Suffixes strong enough to accept an embedded root behind an unknown prefix
const STRONG_SUFFIXES: &[&str] = &["ion", "tion", "ation", "ive", "or", "er"];

/// Spelling matches that look derivational but are unrelated words
const FALSE_POSITIVES: &[(&str, &[&str])] = &[
    ("run", &["runt", "runty", "runes", "rune"]),
    ("act", &["acta", "acute", "acts"]),
    ("happy", &["hap"]),
];

/// Confidence given to a morphological candidate no affix rule explains
pub const LOOSE_MATCH_CONFIDENCE: f64 = 0.60;

/// How a word decomposes around a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixPattern {
    /// root + suffix, spelling rules applied (`run` -> `running`)
    Suffixed,
    /// prefix + root (`act` -> `react`)
    Prefixed,
    /// prefix + root + suffix (`act` -> `transaction`)
    Embedded,
}

impl AffixPattern {
    /// Confidence of a derivation found through this pattern
    pub fn derivation_confidence(self) -> f64 {
        match self {
            AffixPattern::Suffixed => 0.95,
            AffixPattern::Prefixed => 0.92,
            AffixPattern::Embedded => 0.90,
        }
    }

    /// Confidence of a morphological variant matched through this pattern
    pub fn morphological_confidence(self) -> f64 {
        match self {
            AffixPattern::Suffixed | AffixPattern::Prefixed => 0.85,
            AffixPattern::Embedded => 0.75,
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_derivational_suffix(s: &str) -> bool {
    DERIVATIONAL_SUFFIXES.contains(&s)
}

/// A suffix or a stack of two suffixes (`ive` + `ly`)
fn is_suffix_chain(rest: &str) -> bool {
    if rest.is_empty() {
        return false;
    }
    if is_derivational_suffix(rest) {
        return true;
    }
    (1..rest.len()).any(|split| {
        rest.is_char_boundary(split)
            && is_derivational_suffix(&rest[..split])
            && is_derivational_suffix(&rest[split..])
    })
}

/// What follows the root in `word`, under the usual spelling rules
fn remainders_after_root<'a>(word: &'a str, root: &str) -> Vec<&'a str> {
    let mut out = Vec::new();

    if let Some(rest) = word.strip_prefix(root) {
        out.push(rest);
        // consonant doubling: run -> runn-ing
        if let Some(last) = root.chars().last() {
            if last.is_ascii_alphabetic() && !is_vowel(last) && rest.starts_with(last) {
                out.push(&rest[1..]);
            }
        }
    }

    // e-dropping: make -> mak-ing
    if let Some(stem) = root.strip_suffix('e') {
        if let Some(rest) = word.strip_prefix(stem) {
            if rest.chars().next().is_some_and(is_vowel) {
                out.push(rest);
            }
        }
    }

    // y -> i: happy -> happi-ness
    if let Some(stem) = root.strip_suffix('y') {
        if let Some(rest) = word.strip_prefix(stem).and_then(|r| r.strip_prefix('i')) {
            out.push(rest);
        }
    }

    out
}

fn is_false_positive(word: &str, root: &str) -> bool {
    FALSE_POSITIVES
        .iter()
        .any(|(r, words)| *r == root && words.contains(&word))
}

/// Decides whether `word` is a recognized derivation of `root`.
///
/// Both inputs are expected normalized. Identical words and known false
/// positives never match.
pub fn match_derivation(word: &str, root: &str) -> Option<AffixPattern> {
    if word == root || root.is_empty() || is_false_positive(word, root) {
        return None;
    }

    if remainders_after_root(word, root)
        .into_iter()
        .any(is_suffix_chain)
    {
        return Some(AffixPattern::Suffixed);
    }

    if let Some(prefix) = word.strip_suffix(root) {
        if DERIVATIONAL_PREFIXES.contains(&prefix) {
            return Some(AffixPattern::Prefixed);
        }
    }

    if root.len() >= 3 {
        if let Some(pos) = word.find(root).filter(|&p| p > 0) {
            let prefix = &word[..pos];
            let suffix = &word[pos + root.len()..];

            if BOUND_PREFIXES.contains(&prefix)
                && (suffix.len() <= 1
                    || BOUND_SUFFIXES.contains(&suffix)
                    || BOUND_SUFFIXES.iter().any(|s| suffix.starts_with(s)))
            {
                return Some(AffixPattern::Embedded);
            }

            if prefix.len() >= 2 && STRONG_SUFFIXES.contains(&suffix) {
                return Some(AffixPattern::Embedded);
            }
        }
    }

    None
}

/// Candidate stems of `word`, obtained by removing one suffix or one prefix.
///
/// Spelling alternatives are included (undoubled consonant, restored `e`,
/// `i` back to `y`), so a stem list is a superset of the true base.
pub fn candidate_stems(word: &str) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    let mut push = |s: String| {
        if s.len() >= 2 && s != word && !stems.contains(&s) {
            stems.push(s);
        }
    };

    for suffix in SUFFIXES.iter().chain(DERIVATIONAL_SUFFIXES) {
        let Some(base) = word.strip_suffix(suffix) else {
            continue;
        };
        if base.len() < 2 {
            continue;
        }
        push(base.to_string());

        let mut tail = base.chars().rev();
        if let (Some(a), Some(b)) = (tail.next(), tail.next()) {
            if a == b && !is_vowel(a) {
                push(base[..base.len() - a.len_utf8()].to_string());
            }
        }
        if suffix.starts_with(is_vowel) {
            push(format!("{}e", base));
        }
        if let Some(stem) = base.strip_suffix('i') {
            push(format!("{}y", stem));
        }
    }

    for prefix in PREFIXES.iter().chain(DERIVATIONAL_PREFIXES) {
        if let Some(rest) = word.strip_prefix(prefix) {
            if rest.len() >= 3 {
                push(rest.to_string());
            }
        }
    }

    stems
}

/// Confidence that `candidate` and `root` are morphological relatives.
///
/// Checks both directions, since base forms are shorter than the root.
pub fn affix_confidence(candidate: &str, root: &str) -> f64 {
    if let Some(pattern) =
        match_derivation(candidate, root).or_else(|| match_derivation(root, candidate))
    {
        return pattern.morphological_confidence();
    }

    if candidate_stems(candidate).iter().any(|s| s == root)
        || candidate_stems(root).iter().any(|s| s == candidate)
    {
        return AffixPattern::Suffixed.morphological_confidence();
    }

    LOOSE_MATCH_CONFIDENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_suffix_with_spelling_rules() {
        assert_eq!(match_derivation("runner", "run"), Some(AffixPattern::Suffixed));
        assert_eq!(match_derivation("running", "run"), Some(AffixPattern::Suffixed));
        assert_eq!(match_derivation("making", "make"), Some(AffixPattern::Suffixed));
        assert_eq!(match_derivation("happiness", "happy"), Some(AffixPattern::Suffixed));
        assert_eq!(match_derivation("actively", "act"), Some(AffixPattern::Suffixed));
        assert_eq!(match_derivation("action", "act"), Some(AffixPattern::Suffixed));
    }

    #[test]
    fn test_prefix_and_embedded() {
        assert_eq!(match_derivation("rerun", "run"), Some(AffixPattern::Prefixed));
        assert_eq!(match_derivation("react", "act"), Some(AffixPattern::Prefixed));
        assert_eq!(match_derivation("transaction", "act"), Some(AffixPattern::Embedded));
        assert_eq!(match_derivation("interaction", "act"), Some(AffixPattern::Embedded));
    }

    #[test]
    fn test_false_positives_and_identity_rejected() {
        assert_eq!(match_derivation("runt", "run"), None);
        assert_eq!(match_derivation("rune", "run"), None);
        assert_eq!(match_derivation("runes", "run"), None);
        assert_eq!(match_derivation("acute", "act"), None);
        assert_eq!(match_derivation("run", "run"), None);
        assert_eq!(match_derivation("brunch", "run"), None);
    }

    #[test]
    fn test_pattern_confidences() {
        assert_eq!(AffixPattern::Suffixed.derivation_confidence(), 0.95);
        assert_eq!(AffixPattern::Prefixed.derivation_confidence(), 0.92);
        assert_eq!(AffixPattern::Embedded.derivation_confidence(), 0.90);
        assert_eq!(AffixPattern::Embedded.morphological_confidence(), 0.75);
    }

    #[test]
    fn test_candidate_stems() {
        let stems = candidate_stems("running");
        assert!(stems.contains(&"run".to_string()));

        let stems = candidate_stems("making");
        assert!(stems.contains(&"make".to_string()));

        let stems = candidate_stems("unhappy");
        assert!(stems.contains(&"happy".to_string()));

        let stems = candidate_stems("happiness");
        assert!(stems.contains(&"happy".to_string()));
    }

    #[test]
    fn test_affix_confidence_both_directions() {
        assert_eq!(affix_confidence("running", "run"), 0.85);
        assert_eq!(affix_confidence("run", "running"), 0.85);
        assert_eq!(affix_confidence("transaction", "act"), 0.75);
        assert_eq!(affix_confidence("sprint", "run"), LOOSE_MATCH_CONFIDENCE);
    }
}
