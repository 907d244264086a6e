//! Module with the pattern matcher types and their methods.
use log::warn;
use regex::Regex;

use crate::{Result, Span, TokscanError, TokscanErrorKind};

/// A match reported by a [PatternMatcher].
///
/// The span is relative to the haystack handed to [PatternMatcher::find].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// The byte range of the match in the haystack.
    pub span: Span,
    /// The captured sub-groups, in group order. Groups that did not participate are `None`.
    pub groups: Vec<Option<String>>,
}

impl PatternMatch {
    /// Create a new pattern match without captured groups.
    pub fn new(span: Span) -> Self {
        Self {
            span,
            groups: Vec::new(),
        }
    }

    /// Set the captured groups of the match.
    pub fn with_groups(self, groups: Vec<Option<String>>) -> Self {
        Self {
            span: self.span,
            groups,
        }
    }

    /// Get the start of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Get the end of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Check if the match is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

/// A stateless matcher that detects instances of one token type.
///
/// Implementations must not keep any match position between calls, so that a matcher can be shared
/// by several threads and reused by several scans at the same time.
///
/// A matcher that reports an empty match is treated as not matching at all for the current scan
/// position.
pub trait PatternMatcher: std::fmt::Debug + Send + Sync {
    /// Find the leftmost match in `haystack`.
    fn find(&self, haystack: &str) -> Option<PatternMatch>;

    /// Check if the matches of this matcher depend only on the text they cover, i.e. the matcher
    /// uses no anchors, word boundaries or other look-around assertions.
    ///
    /// The scanner reuses a match of such a matcher in later steps as long as the match lies
    /// behind the scan position, instead of searching the rest of the haystack again.
    /// Return `false` if unsure.
    fn is_look_free(&self) -> bool {
        false
    }
}

/// A pattern matcher backed by a regular expression.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    can_match_empty: bool,
    look_free: bool,
}

impl RegexMatcher {
    /// Create a new regex matcher from the given pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            TokscanError::new(TokscanErrorKind::RegexError(e, pattern.to_string()))
        })?;
        Ok(Self::from_regex(regex))
    }

    /// Create a new regex matcher from an already compiled regex.
    pub fn from_regex(regex: Regex) -> Self {
        let (can_match_empty, look_free) = regex_syntax::parse(regex.as_str())
            .map(|hir| {
                let props = hir.properties();
                (props.minimum_len() == Some(0), props.look_set().is_empty())
            })
            .unwrap_or((false, false));
        if can_match_empty {
            warn!(
                "Pattern '{}' can match the empty string, empty matches are ignored",
                regex.as_str().escape_default()
            );
        }
        Self {
            regex,
            can_match_empty,
            look_free,
        }
    }

    /// Get the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Check if the pattern can match the empty string.
    #[inline]
    pub fn can_match_empty(&self) -> bool {
        self.can_match_empty
    }
}

impl PatternMatcher for RegexMatcher {
    fn find(&self, haystack: &str) -> Option<PatternMatch> {
        if self.regex.captures_len() == 1 {
            // No sub-groups, the cheaper search is enough.
            return self
                .regex
                .find(haystack)
                .map(|m| PatternMatch::new(m.range().into()));
        }
        self.regex.captures(haystack).map(|caps| {
            let groups = caps
                .iter()
                .skip(1)
                .map(|g| g.map(|g| g.as_str().to_string()))
                .collect();
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            PatternMatch::new(whole.into()).with_groups(groups)
        })
    }

    fn is_look_free(&self) -> bool {
        self.look_free
    }
}

impl std::fmt::Display for RegexMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.regex.as_str().escape_default())
    }
}
