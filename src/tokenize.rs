//! Text normalization and tokenization.
//!
//! The tokenizer is the one component shared verbatim between index
//! construction and query evaluation. If the two ever disagree on
//! normalization, indexed terms and query terms stop lining up and search
//! silently returns nothing - so both sides take the same [`Tokenizer`]
//! value, and richer stemming plugs in through the [`Stem`] trait rather
//! than by forking the pipeline.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Minimum term length kept by the default tokenizer.
pub const DEFAULT_MIN_TERM_LEN: usize = 3;

/// Stop words loaded from data/stop_words.json.
///
/// These words are:
/// 1. Too common to be useful for search ranking
/// 2. Waste index space
///
/// The JSON file groups words by language; all groups are flattened into a
/// single set, stored in normalized form.
static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let json_str = include_str!("../data/stop_words.json");
    parse_stop_words_json(json_str)
});

/// Parse stop words from JSON, flattening all language arrays into one set.
/// Words are normalized to match how input text is normalized.
fn parse_stop_words_json(json_str: &str) -> HashSet<String> {
    let by_language: std::collections::HashMap<String, Vec<String>> =
        serde_json::from_str(json_str).unwrap_or_default();

    by_language
        .into_values()
        .flatten()
        .map(|word| normalize(&word))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Normalize a string for search: lowercase, strip diacritics, collapse
/// whitespace.
///
/// This makes ASCII queries match accented text:
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
///
/// # Algorithm (without unicode-normalization)
///
/// 1. Lowercase only (assumes input is pre-normalized or ASCII)
/// 2. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lightweight normalization without the unicode-normalization dependency.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Stemming hook for languages richer than the default.
///
/// Implementations must be deterministic: the builder and the query engine
/// both stem through the same value, and an unstable stemmer breaks the
/// index/query symmetry.
pub trait Stem: Send + Sync {
    fn stem(&self, term: &str) -> String;
}

/// Turns raw text into normalized index terms.
///
/// Pure and restartable: `tokenize` borrows the input, produces terms
/// lazily, and can be called any number of times. Degenerate input yields an
/// empty sequence, never an error.
pub struct Tokenizer {
    min_term_len: usize,
    stop_words: HashSet<String>,
    stemmer: Option<Box<dyn Stem>>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            min_term_len: DEFAULT_MIN_TERM_LEN,
            stop_words: STOP_WORDS.clone(),
            stemmer: None,
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("min_term_len", &self.min_term_len)
            .field("stop_words", &self.stop_words.len())
            .field("stemmer", &self.stemmer.is_some())
            .finish()
    }
}

impl Tokenizer {
    /// Tokenizer with a custom minimum length and stop-word set.
    pub fn new(min_term_len: usize, stop_words: HashSet<String>) -> Self {
        Tokenizer {
            min_term_len,
            stop_words,
            stemmer: None,
        }
    }

    /// Attach a stemming hook. The same tokenizer value must then be used
    /// for both building and querying.
    pub fn with_stemmer(mut self, stemmer: Box<dyn Stem>) -> Self {
        self.stemmer = Some(stemmer);
        self
    }

    /// Split text into normalized terms.
    ///
    /// Word boundaries are non-alphanumeric characters, so dotted paths like
    /// `pkg.constants.Country` and snake_case names both decompose into their
    /// segments. Tokens shorter than the minimum length and stop words are
    /// dropped.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .filter_map(move |part| {
                let term = normalize(part);
                if term.chars().count() < self.min_term_len || self.stop_words.contains(&term) {
                    return None;
                }
                Some(match &self.stemmer {
                    Some(stemmer) => stemmer.stem(&term),
                    None => term,
                })
            })
    }

    /// Tokenize and collect the distinct terms in first-seen order.
    ///
    /// Queries use this: repeating a term must not double its score.
    pub fn distinct_terms(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokenize(text)
            .filter(|term| seen.insert(term.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_and_lowercases() {
        let tok = Tokenizer::default();
        let terms: Vec<String> = tok.tokenize("Base Functions").collect();
        assert_eq!(terms, vec!["base", "functions"]);
    }

    #[test]
    fn tokenize_splits_dotted_and_snake_case_names() {
        let tok = Tokenizer::default();
        let terms: Vec<String> = tok.tokenize("bigearthnet_common.constants.Country").collect();
        assert_eq!(terms, vec!["bigearthnet", "common", "constants", "country"]);
    }

    #[test]
    fn tokenize_drops_short_tokens_and_stop_words() {
        let tok = Tokenizer::default();
        let terms: Vec<String> = tok.tokenize("a map of the world is it").collect();
        assert_eq!(terms, vec!["map", "world"]);
    }

    #[test]
    fn tokenize_empty_input_yields_empty_sequence() {
        let tok = Tokenizer::default();
        assert_eq!(tok.tokenize("").count(), 0);
        assert_eq!(tok.tokenize("   .,;!   ").count(), 0);
    }

    #[test]
    fn tokenize_is_restartable() {
        let tok = Tokenizer::default();
        let text = "label mapping helpers";
        let first: Vec<String> = tok.tokenize(text).collect();
        let second: Vec<String> = tok.tokenize(text).collect();
        assert_eq!(first, second);
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn normalize_strips_diacritics() {
        assert_eq!(normalize("café"), "cafe");
        assert_eq!(normalize("naïve"), "naive");
    }

    #[test]
    fn distinct_terms_dedups_repeats() {
        let tok = Tokenizer::default();
        assert_eq!(tok.distinct_terms("country country season"), vec!["country", "season"]);
    }

    struct ChopStemmer;

    impl Stem for ChopStemmer {
        fn stem(&self, term: &str) -> String {
            term.trim_end_matches('s').to_string()
        }
    }

    #[test]
    fn stemmer_hook_applies_after_normalization() {
        let tok = Tokenizer::default().with_stemmer(Box::new(ChopStemmer));
        let terms: Vec<String> = tok.tokenize("Helpers").collect();
        assert_eq!(terms, vec!["helper"]);
    }
}
