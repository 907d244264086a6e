//! Module with functions that count occurrences of a text, either among tokens or in a plain
//! string.
use rustc_hash::FxHashMap;

use crate::{OccurrenceAnnotation, Token};

/// Returns the number of tokens whose text equals `text`.
pub fn occurrences_in_tokens(tokens: &[Token], text: &str) -> usize {
    tokens.iter().filter(|t| t.text == text).count()
}

/// Returns the 1-based occurrence of `text` at the token with the given index, i.e. the number of
/// tokens up to and including `index` whose text equals `text`.
pub fn occurrence_in_tokens(tokens: &[Token], index: usize, text: &str) -> usize {
    tokens
        .iter()
        .take(index.saturating_add(1))
        .filter(|t| t.text == text)
        .count()
}

/// Computes the occurrence annotation of every token, in one pass over the tokens.
pub fn annotate_occurrences(tokens: &[Token]) -> Vec<OccurrenceAnnotation> {
    let mut totals: FxHashMap<&str, usize> = FxHashMap::default();
    for token in tokens {
        *totals.entry(token.text.as_str()).or_default() += 1;
    }
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    tokens
        .iter()
        .map(|token| {
            let occurrence = seen.entry(token.text.as_str()).or_default();
            *occurrence += 1;
            OccurrenceAnnotation {
                occurrence: *occurrence,
                occurrences: totals.get(token.text.as_str()).copied().unwrap_or_default(),
            }
        })
        .collect()
}

/// Returns the number of non-overlapping occurrences of `needle` in `haystack`.
/// An empty needle never occurs.
pub fn occurrences_in_string(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Returns the number of non-overlapping occurrences of `needle` in `haystack` that start at or
/// before the byte offset `index`. If `needle` starts at `index`, this is its 1-based occurrence.
pub fn occurrence_in_string(haystack: &str, index: usize, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .match_indices(needle)
        .take_while(|(start, _)| *start <= index)
        .count()
}
