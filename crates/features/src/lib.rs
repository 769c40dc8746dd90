//! Text features for location and name analysis.
//!
//! Provides pure functions used by the normalizer and the map query builder:
//! - Word-boundary matching and whitespace cleanup
//! - The restaurant-generic noun filter
//! - Significant-token extraction and name similarity
//! - Edit distance and phonetic encodings for misspelled tokens

use once_cell::sync::Lazy;
use regex::Regex;
use rphonetic::{Encoder, Metaphone};

/// Words that mark a fragment as part of a restaurant name rather than a place.
pub const GENERIC_NOUNS: &[&str] = &[
    "restaurant",
    "cafe",
    "bar",
    "grill",
    "kitchen",
    "cuisine",
    "food",
    "hall",
    "steakhouse",
    "bakery",
    "modern",
    "indian",
    "vegetarian",
    "mediterranean",
];

static GENERIC_NOUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", GENERIC_NOUNS.join("|")))
        .expect("generic noun pattern is valid")
});

/// Compile a case-insensitive, word-bounded pattern for a literal term.
pub fn word_pattern(term: &str) -> Regex {
    // Escaped literal inside fixed anchors always compiles.
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).expect("escaped literal is valid")
}

/// Whether `text` contains any restaurant-generic noun as a whole word.
pub fn is_generic(text: &str) -> bool {
    GENERIC_NOUN_RE.is_match(text)
}

/// Remove restaurant-generic nouns and collapse the leftover whitespace.
pub fn strip_generic(text: &str) -> String {
    collapse_whitespace(&GENERIC_NOUN_RE.replace_all(text, ""))
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Strip `prefix` from the start of `text`, ignoring case.
pub fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text.char_indices();
    for p in prefix.chars() {
        let (_, c) = rest.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    match rest.next() {
        Some((idx, _)) => Some(&text[idx..]),
        None => Some(""),
    }
}

/// Lowercased whitespace tokens longer than two characters.
pub fn significant_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| char_len(w) > 2)
        .map(str::to_string)
        .collect()
}

/// How two tokens are compared when counting name overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// Tokens must be equal.
    Exact,
    /// Either token contains the other, or longer tokens are one edit or
    /// one Metaphone code apart.
    Fuzzy,
}

impl TokenMatch {
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            Self::Exact => a == b,
            Self::Fuzzy => {
                if a.contains(b) || b.contains(a) {
                    return true;
                }
                if char_len(a) < 5 || char_len(b) < 5 {
                    return false;
                }
                edit_distance(a, b) <= 1 || phonetic_match(a, b)
            }
        }
    }
}

/// Overlap between a name's significant tokens and another text's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOverlap {
    /// Significant tokens in the name
    pub name_tokens: usize,
    /// Name tokens that found a partner in the other text
    pub shared: usize,
}

impl NameOverlap {
    /// Count name tokens that match some token of `other`.
    pub fn measure(name: &str, other: &str, mode: TokenMatch) -> Self {
        let name_tokens = significant_tokens(name);
        let other_tokens = significant_tokens(other);
        let shared = name_tokens
            .iter()
            .filter(|n| other_tokens.iter().any(|o| mode.matches(n, o)))
            .count();

        Self {
            name_tokens: name_tokens.len(),
            shared,
        }
    }

    /// Similar when at least `max(2, ratio * name_tokens)` tokens are shared.
    pub fn is_similar(&self, ratio: f32) -> bool {
        if self.name_tokens == 0 {
            return false;
        }
        let needed = (ratio * self.name_tokens as f32).max(2.0);
        self.shared as f32 >= needed
    }
}

/// Metaphone code of a token, if it has one.
pub fn metaphone(text: &str) -> Option<String> {
    let code = Metaphone::default().encode(text);
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Check if two tokens share a Metaphone code.
pub fn phonetic_match(text1: &str, text2: &str) -> bool {
    match (metaphone(text1), metaphone(text2)) {
        (Some(m1), Some(m2)) => m1 == m2,
        _ => false,
    }
}

/// Compute Levenshtein edit distance between two strings.
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();

    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut curr = vec![0; s2.len() + 1];

    for i in 1..=s1.len() {
        curr[0] = i;
        for j in 1..=s2.len() {
            let cost = if s1[i - 1] == s2[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s2.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generic_nouns_match_whole_words() {
        assert!(is_generic("Tilly Kitchen Food Hall"));
        assert!(is_generic("FiLLi CAFE"));
        assert!(!is_generic("Barcelona"));
        assert!(!is_generic("Sterling"));
    }

    #[test]
    fn test_strip_generic() {
        assert_eq!(strip_generic("Biryani Grill Herndon"), "Biryani Herndon");
        assert_eq!(strip_generic("Restaurant   Cafe"), "");
    }

    #[test]
    fn test_word_pattern() {
        let va = word_pattern("VA");
        assert!(va.is_match("Sterling va 20166"));
        assert!(!va.is_match("Java House"));
        assert!(word_pattern("Falls Church").is_match("near falls church"));
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(
            strip_prefix_ignore_case("Peter Chang Herndon", "peter chang"),
            Some(" Herndon")
        );
        assert_eq!(strip_prefix_ignore_case("Toosso", "TOOSSO"), Some(""));
        assert_eq!(strip_prefix_ignore_case("Toss", "Toosso"), None);
    }

    #[test]
    fn test_significant_tokens() {
        assert_eq!(
            significant_tokens("Chateau de Chantilly Cafe"),
            vec!["chateau", "chantilly", "cafe"]
        );
    }

    #[test]
    fn test_fuzzy_overlap_catches_misspelling() {
        let overlap =
            NameOverlap::measure("Chateau de Chantily", "Chateau de Chantilly Cafe", TokenMatch::Fuzzy);
        assert_eq!(overlap.name_tokens, 2);
        assert_eq!(overlap.shared, 2);
        assert!(overlap.is_similar(0.6));
    }

    #[test]
    fn test_exact_overlap() {
        let overlap = NameOverlap::measure("Tilly Kitchen", "Tilly Kitchen, Virginia", TokenMatch::Exact);
        // "kitchen," keeps its comma
        assert_eq!(overlap.shared, 1);
        assert!(!overlap.is_similar(0.7));
    }

    #[test]
    fn test_similarity_needs_name_tokens() {
        let overlap = NameOverlap::measure("A2B", "A2B Indian", TokenMatch::Fuzzy);
        assert_eq!(overlap.name_tokens, 1);
        assert!(!overlap.is_similar(0.6));
        assert!(!NameOverlap::measure("", "anything", TokenMatch::Fuzzy).is_similar(0.6));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kabob", "kabob"), 0);
        assert_eq!(edit_distance("chantily", "chantilly"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Falls   Church "), "Falls Church");
    }
}
