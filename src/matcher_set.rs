//! Module with the ordered matcher set and the built-in matchers.
use std::sync::{Arc, LazyLock};

use crate::{PatternMatcher, RegexMatcher};

/// Token type of the built-in word matcher.
pub const WORD: &str = "word";
/// Token type of the built-in number matcher.
pub const NUMBER: &str = "number";
/// Token type of the built-in punctuation matcher.
pub const PUNCTUATION: &str = "punctuation";
/// Token type of the built-in whitespace matcher.
pub const WHITESPACE: &str = "whitespace";
/// Token type of text between matches if no other default type is configured.
pub const UNKNOWN: &str = "unknown";

const WORD_PATTERN: &str = r"[\p{L}\p{M}\u{200D}\u{2060}]+";
const NUMBER_PATTERN: &str = r"[\p{N}\p{Nd}\p{Nl}\p{No}]+";
const PUNCTUATION_PATTERN: &str = r"(^\p{P}|[<>]{2})";
// Tab, line feed, vertical tab, form feed, carriage return, the Space_Separator characters,
// the line and paragraph separators and the byte order mark. Unlike `\s` it excludes U+0085.
pub(crate) const WHITESPACE_CLASS: &str = r"[\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]";

static WORD_MATCHER: LazyLock<Arc<dyn PatternMatcher>> =
    LazyLock::new(|| builtin_matcher(WORD_PATTERN.to_string()));
static NUMBER_MATCHER: LazyLock<Arc<dyn PatternMatcher>> =
    LazyLock::new(|| builtin_matcher(NUMBER_PATTERN.to_string()));
static PUNCTUATION_MATCHER: LazyLock<Arc<dyn PatternMatcher>> =
    LazyLock::new(|| builtin_matcher(PUNCTUATION_PATTERN.to_string()));
static WHITESPACE_MATCHER: LazyLock<Arc<dyn PatternMatcher>> =
    LazyLock::new(|| builtin_matcher(format!("{WHITESPACE_CLASS}+")));
// Words or numbers joined to further words by hyphens or apostrophes, or a word with a trailing
// closing quote.
static GREEDY_WORD_MATCHER: LazyLock<Arc<dyn PatternMatcher>> = LazyLock::new(|| {
    builtin_matcher(format!(
        "(({WORD_PATTERN}|{NUMBER_PATTERN})([-'’]{WORD_PATTERN})+|{WORD_PATTERN}’?)"
    ))
});
// Numbers joined by time, decimal or thousands separators.
static GREEDY_NUMBER_MATCHER: LazyLock<Arc<dyn PatternMatcher>> = LazyLock::new(|| {
    builtin_matcher(format!(
        "({NUMBER_PATTERN}([:.,]?{NUMBER_PATTERN})+|{NUMBER_PATTERN})"
    ))
});

fn builtin_matcher(pattern: String) -> Arc<dyn PatternMatcher> {
    Arc::new(RegexMatcher::new(&pattern).expect("built-in patterns are valid"))
}

/// The built-in word matcher.
pub fn word() -> Arc<dyn PatternMatcher> {
    Arc::clone(&WORD_MATCHER)
}

/// The built-in number matcher.
pub fn number() -> Arc<dyn PatternMatcher> {
    Arc::clone(&NUMBER_MATCHER)
}

/// The built-in punctuation matcher.
/// It matches a single punctuation character at the scan position or a pair of angle brackets
/// like `<<` anywhere.
pub fn punctuation() -> Arc<dyn PatternMatcher> {
    Arc::clone(&PUNCTUATION_MATCHER)
}

/// The built-in whitespace matcher.
pub fn whitespace() -> Arc<dyn PatternMatcher> {
    Arc::clone(&WHITESPACE_MATCHER)
}

/// The greedy word matcher, see [MatcherSet::greedy].
pub fn greedy_word() -> Arc<dyn PatternMatcher> {
    Arc::clone(&GREEDY_WORD_MATCHER)
}

/// The greedy number matcher, see [MatcherSet::greedy].
pub fn greedy_number() -> Arc<dyn PatternMatcher> {
    Arc::clone(&GREEDY_NUMBER_MATCHER)
}

/// A named matcher. The name doubles as the token type of the matched tokens.
#[derive(Debug, Clone)]
pub struct NamedMatcher {
    /// The name of the matcher.
    pub name: String,
    /// The matcher itself.
    pub matcher: Arc<dyn PatternMatcher>,
}

/// An ordered list of named matchers.
///
/// The order is significant: if several matchers find a match at the same earliest position, the
/// one that comes first in the set wins.
/// Names are unique, adding a matcher with an existing name replaces that entry in place.
#[derive(Debug, Clone)]
pub struct MatcherSet {
    matchers: Vec<NamedMatcher>,
}

impl MatcherSet {
    /// Creates an empty matcher set.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Adds a matcher to the set.
    pub fn with(mut self, name: &str, matcher: Arc<dyn PatternMatcher>) -> Self {
        self.insert(name, matcher);
        self
    }

    /// Adds a matcher to the set or replaces the matcher with the same name, keeping its
    /// position.
    pub fn insert(&mut self, name: &str, matcher: Arc<dyn PatternMatcher>) {
        if let Some(entry) = self.matchers.iter_mut().find(|m| m.name == name) {
            entry.matcher = matcher;
        } else {
            self.matchers.push(NamedMatcher {
                name: name.to_string(),
                matcher,
            });
        }
    }

    /// Returns a copy of the set where the word and number matchers are replaced by their greedy
    /// variants. The greedy variants still produce tokens of type `word` and `number`.
    pub fn greedy(&self) -> Self {
        self.clone()
            .with(WORD, greedy_word())
            .with(NUMBER, greedy_number())
    }

    /// Returns the matcher with the given name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn PatternMatcher>> {
        self.matchers
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.matcher)
    }

    /// Checks if the set contains a matcher with the given name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the names of the matchers in set order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.name.as_str())
    }

    /// Returns an iterator over the named matchers in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, NamedMatcher> {
        self.matchers.iter()
    }

    /// Returns the number of matchers.
    #[inline]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Checks if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for MatcherSet {
    /// The built-in matchers in the order word, whitespace, punctuation, number.
    fn default() -> Self {
        Self::new()
            .with(WORD, word())
            .with(WHITESPACE, whitespace())
            .with(PUNCTUATION, punctuation())
            .with(NUMBER, number())
    }
}

impl<'a> IntoIterator for &'a MatcherSet {
    type Item = &'a NamedMatcher;
    type IntoIter = std::slice::Iter<'a, NamedMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.matchers.iter()
    }
}
