//! Base-form stripping and variant generation

use super::affixes::{PREFIXES, SUFFIXES};

const SUFFIX_DEPTH: usize = 3;
const PREFIX_DEPTH: usize = 2;

/// Suffixes after which the stripped stem is used to build variants
const INFLECTIONS: &[&str] = &["ing", "ed", "er", "est", "s", "es"];

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_consonant(c: u8) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

/// Consonant-vowel-consonant ending whose final consonant doubles (`run`, `stop`)
pub fn should_double_consonant(word: &str) -> bool {
    let b = word.as_bytes();
    if b.len() < 3 {
        return false;
    }
    let (c1, v, c2) = (b[b.len() - 3], b[b.len() - 2], b[b.len() - 1]);
    is_consonant(c1) && is_vowel(v) && is_consonant(c2) && !matches!(c2, b'w' | b'x' | b'y')
}

fn by_length_desc(table: &[&'static str]) -> Vec<&'static str> {
    let mut sorted = table.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
}

/// Like [`strip_suffix`], also returning the suffix that was removed
fn strip_suffix_with(word: &str) -> Option<(String, &'static str)> {
    if !word.is_ascii() {
        return None;
    }
    for suffix in by_length_desc(SUFFIXES) {
        if !word.ends_with(suffix) || word.len() <= suffix.len() + 2 {
            continue;
        }
        let base = &word[..word.len() - suffix.len()];
        let b = base.as_bytes();
        let last = b[b.len() - 1];
        let doubled = b.len() >= 2
            && last == b[b.len() - 2]
            && is_consonant(last)
            && !matches!(last, b'l' | b's' | b'f' | b'z');
        if doubled {
            return Some((base[..base.len() - 1].to_string(), suffix));
        }
        if matches!(suffix, "ing" | "ed" | "er" | "est") && should_double_consonant(base) {
            return Some((format!("{}e", base), suffix));
        }
        return Some((base.to_string(), suffix));
    }
    None
}

/// Removes the longest matching suffix, undoing consonant doubling and
/// restoring a dropped `e` where the remaining stem calls for it.
pub fn strip_suffix(word: &str) -> Option<String> {
    strip_suffix_with(word).map(|(base, _)| base)
}

/// Removes the longest matching prefix
pub fn strip_prefix(word: &str) -> Option<String> {
    by_length_desc(PREFIXES)
        .into_iter()
        .find(|prefix| word.starts_with(prefix) && word.len() > prefix.len() + 2)
        .map(|prefix| word[prefix.len()..].to_string())
}

fn strip_repeatedly(word: &str, depth: usize, strip: fn(&str) -> Option<String>) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = word.to_string();
    for _ in 0..depth {
        match strip(&current) {
            Some(next) if next != current && next.len() >= 3 => {
                chain.push(next.clone());
                current = next;
            }
            _ => break,
        }
    }
    chain
}

/// Successive suffix-stripped base forms: `additionally` -> `additional` -> `addition`
pub fn suffix_chain(word: &str) -> Vec<String> {
    strip_repeatedly(word, SUFFIX_DEPTH, strip_suffix)
}

/// Successive prefix-stripped base forms: `unrewritable` -> `rewritable` -> `writable`
pub fn prefix_chain(word: &str) -> Vec<String> {
    strip_repeatedly(word, PREFIX_DEPTH, strip_prefix)
}

/// Inflectional and derivational variants of `word`, in a stable order.
///
/// When the word is itself inflected, variants are built on its base form.
/// The word itself is not included.
pub fn generate_variants(word: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut add = |v: String| {
        if v != word && !variants.contains(&v) {
            variants.push(v);
        }
    };

    let stripped = strip_suffix_with(word);
    if let Some((base, _)) = &stripped {
        add(base.clone());
    }
    if let Some(base) = strip_prefix(word) {
        add(base);
    }

    let base = match stripped {
        Some((base, suffix)) if INFLECTIONS.contains(&suffix) => base,
        _ => word.to_string(),
    };
    if base.is_empty() || !base.is_ascii() {
        return variants;
    }
    let doubled = should_double_consonant(&base);
    let stem_e = base.strip_suffix('e');

    for ending in ["ing", "ed", "er"] {
        if base.ends_with(ending) {
            continue;
        }
        if let Some(stem) = stem_e {
            add(format!("{}{}", stem, ending));
        } else if doubled {
            let last = &base[base.len() - 1..];
            add(format!("{}{}{}", base, last, ending));
        } else {
            add(format!("{}{}", base, ending));
        }
    }

    if base.ends_with(&['s', 'x', 'z'][..]) || base.ends_with("ch") || base.ends_with("sh") {
        add(format!("{}es", base));
    } else {
        add(format!("{}s", base));
    }

    if base.len() > 3 {
        if base.ends_with("te") {
            add(format!("{}ion", &base[..base.len() - 1]));
        } else if let Some(stem) = stem_e {
            add(format!("{}ation", stem));
        } else {
            add(format!("{}tion", base));
            add(format!("{}ation", base));
        }
    }

    add(format!("{}ly", base));
    add(format!("{}ness", base));

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_suffix_spelling_rules() {
        assert_eq!(strip_suffix("running").as_deref(), Some("run"));
        assert_eq!(strip_suffix("making").as_deref(), Some("make"));
        assert_eq!(strip_suffix("jumped").as_deref(), Some("jump"));
        assert_eq!(strip_suffix("falling").as_deref(), Some("fall"));
        assert_eq!(strip_suffix("run"), None);
    }

    #[test]
    fn test_suffix_chain_is_recursive() {
        let chain = suffix_chain("additionally");
        assert_eq!(&chain[..2], ["additional", "addition"]);
        assert!(chain.len() <= 3);
        assert!(suffix_chain("run").is_empty());
    }

    #[test]
    fn test_prefix_chain() {
        assert_eq!(prefix_chain("unrewritable"), vec!["rewritable", "writable"]);
    }

    #[test]
    fn test_should_double_consonant() {
        assert!(should_double_consonant("run"));
        assert!(should_double_consonant("stop"));
        assert!(!should_double_consonant("play"));
        assert!(!should_double_consonant("jump"));
    }

    #[test]
    fn test_generate_variants_for_run() {
        assert_eq!(
            generate_variants("run"),
            vec!["running", "runned", "runner", "runs", "runly", "runness"]
        );
    }

    #[test]
    fn test_generate_variants_drops_final_e() {
        let variants = generate_variants("create");
        assert!(variants.contains(&"creating".to_string()));
        assert!(variants.contains(&"created".to_string()));
        assert!(variants.contains(&"creation".to_string()));
        assert!(!variants.contains(&"createing".to_string()));
    }

    #[test]
    fn test_generate_variants_from_inflected_word() {
        let variants = generate_variants("running");
        assert_eq!(variants[0], "run");
        assert!(variants.contains(&"runner".to_string()));
        assert!(!variants.contains(&"running".to_string()));
    }

    #[test]
    fn test_sibilant_plural() {
        assert!(generate_variants("watch").contains(&"watches".to_string()));
        assert!(generate_variants("box").contains(&"boxes".to_string()));
    }
}
