//! Module with helpers that mark selected parts of a text.
//! A selection names a text and its occurrence, e.g. the second `the` in a sentence. Selections
//! are turned into byte ranges, and the ranges are used to split the text into selected and
//! unselected parts.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, Span, TokscanError, TokscanErrorKind};

/// A selected text and its 1-based occurrence in the whole text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Selection {
    /// The selected text.
    pub text: String,
    /// The 1-based occurrence of the text.
    pub occurrence: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(text: &str, occurrence: usize) -> Self {
        Self {
            text: text.to_string(),
            occurrence,
        }
    }
}

/// A part of a text, either selected or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectedText {
    /// The text of the part.
    pub text: String,
    /// If the part is selected.
    pub selected: bool,
}

impl SelectedText {
    fn new(text: &str, selected: bool) -> Self {
        Self {
            text: text.to_string(),
            selected,
        }
    }
}

/// Locates each selection in `text` and returns its byte range.
/// Selections whose occurrence does not exist in the text are skipped.
pub fn selections_to_ranges(text: &str, selections: &[Selection]) -> Vec<Span> {
    selections
        .iter()
        .filter(|s| !s.text.is_empty() && s.occurrence > 0)
        .filter_map(|s| {
            text.match_indices(s.text.as_str())
                .nth(s.occurrence - 1)
                .map(|(start, matched)| Span::new(start, start + matched.len()))
        })
        .collect()
}

/// Splits `text` into selected and unselected parts along the given ranges.
///
/// Overlapping and adjacent ranges are merged first. Empty parts are left out.
/// Fails if a range does not lie within `text` or does not start and end at a char boundary.
pub fn splice_string_on_ranges(text: &str, ranges: &[Span]) -> Result<Vec<SelectedText>> {
    let mut parts = Vec::new();
    let mut position = 0;
    for range in merge_ranges(text, ranges)? {
        if range.start > position {
            parts.push(SelectedText::new(&text[position..range.start], false));
        }
        if !range.is_empty() {
            parts.push(SelectedText::new(&text[range.range()], true));
        }
        position = range.end;
    }
    if position < text.len() {
        parts.push(SelectedText::new(&text[position..], false));
    }
    Ok(parts)
}

/// Splits `text` into selected and unselected parts along the given selections.
pub fn selection_array(text: &str, selections: &[Selection]) -> Result<Vec<SelectedText>> {
    splice_string_on_ranges(text, &selections_to_ranges(text, selections))
}

fn merge_ranges(text: &str, ranges: &[Span]) -> Result<Vec<Span>> {
    if let Some(invalid) = ranges.iter().find(|r| {
        r.start > r.end
            || r.end > text.len()
            || !text.is_char_boundary(r.start)
            || !text.is_char_boundary(r.end)
    }) {
        return Err(TokscanError::new(TokscanErrorKind::InvalidInput(format!(
            "Range {} does not fit a text of {} bytes",
            invalid,
            text.len()
        ))));
    }
    let mut sorted = ranges.to_vec();
    sorted.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.touches(&range) => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(parts: &[SelectedText]) -> Vec<(&str, bool)> {
        parts.iter().map(|p| (p.text.as_str(), p.selected)).collect()
    }

    #[test]
    fn test_selections_to_ranges() {
        let text = "the cat and the hat";
        let ranges = selections_to_ranges(
            text,
            &[
                Selection::new("the", 2),
                Selection::new("cat", 1),
                Selection::new("dog", 1),
                Selection::new("the", 3),
            ],
        );
        assert_eq!(ranges, vec![Span::new(12, 15), Span::new(4, 7)]);
    }

    #[test]
    fn test_selection_array() {
        let text = "the cat and the hat";
        let result = selection_array(
            text,
            &[Selection::new("hat", 1), Selection::new("the", 1)],
        )
        .unwrap();
        assert_eq!(
            parts(&result),
            vec![
                ("the", true),
                (" cat and the ", false),
                ("hat", true)
            ]
        );
    }

    #[test]
    fn test_overlapping_ranges_are_merged() {
        let result =
            splice_string_on_ranges("abcdefgh", &[Span::new(4, 6), Span::new(1, 3), Span::new(2, 4)])
                .unwrap();
        assert_eq!(
            parts(&result),
            vec![("a", false), ("bcdef", true), ("gh", false)]
        );
    }

    #[test]
    fn test_invalid_range() {
        assert!(splice_string_on_ranges("abc", &[Span::new(2, 5)]).is_err());
        assert!(splice_string_on_ranges("äb", &[Span::new(1, 2)]).is_err());
        assert_eq!(
            parts(&splice_string_on_ranges("abc", &[]).unwrap()),
            vec![("abc", false)]
        );
    }
}
