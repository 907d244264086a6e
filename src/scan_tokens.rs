use log::trace;

use crate::{
    MatcherSet, NamedMatcher, NormalizationSet, PatternMatch, Result, Span, Token, TokscanError,
    TokscanErrorKind,
};

// The last result of a look-free matcher, with the span relative to the whole input.
#[derive(Debug, Clone)]
enum CachedMatch {
    Stale,
    Missing,
    Found(PatternMatch),
}

/// An iterator over the tokens of a haystack.
///
/// Every byte of the haystack ends up in exactly one token. Text that no matcher recognizes is
/// yielded as a token of the default type.
///
/// * `'s` represents the lifetime of the scanner configuration.
/// * `'h` represents the lifetime of the haystack being scanned.
///
/// This iterator can be created with the [`crate::Scanner::scan_iter`] method.
#[derive(Debug)]
pub struct ScanTokens<'s, 'h> {
    matchers: &'s MatcherSet,
    default_type: &'s str,
    normalizations: Option<&'s NormalizationSet>,
    input: &'h str,
    // Byte offset of the not yet scanned rest of the input.
    cursor: usize,
    // The matched token that follows an already yielded gap token.
    pending: Option<Token>,
    iterations: usize,
    failed: bool,
    // Indexed like the matcher set.
    look_free: Vec<bool>,
    cached: Vec<CachedMatch>,
}

impl<'s, 'h> ScanTokens<'s, 'h> {
    /// Creates a new `ScanTokens` iterator.
    pub(crate) fn new(
        matchers: &'s MatcherSet,
        default_type: &'s str,
        normalizations: Option<&'s NormalizationSet>,
        input: &'h str,
    ) -> Self {
        Self {
            matchers,
            default_type,
            normalizations,
            input,
            cursor: 0,
            pending: None,
            iterations: 0,
            failed: false,
            look_free: matchers.iter().map(|m| m.matcher.is_look_free()).collect(),
            cached: vec![CachedMatch::Stale; matchers.len()],
        }
    }

    /// Retrieve the byte offset up to which the haystack has been scanned.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Returns the next token in the haystack, or `None` at the end of the haystack.
    ///
    /// Each step consumes at least one byte, either by a non-empty match or by unmatched text, so
    /// the number of steps is bounded by the length of the haystack. Exceeding this bound can only
    /// happen if a matcher misbehaves and is reported as an error.
    pub fn next_token(&mut self) -> Option<Result<Token>> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }
        if self.failed || self.cursor >= self.input.len() {
            return None;
        }
        self.iterations += 1;
        if self.iterations > self.input.len() + 1 {
            return self.fail(format!(
                "Scanner exceeded {} iterations at offset {}",
                self.input.len() + 1,
                self.cursor
            ));
        }

        let input = self.input;
        let remaining = &input[self.cursor..];
        let best = match self.earliest_match() {
            Ok(best) => best,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let gap = best.as_ref().map_or(remaining.len(), |(_, m)| m.start());
        let gap_token = (gap > 0).then(|| {
            trace!("Unmatched text at {}..{}", self.cursor, self.cursor + gap);
            Token::new(
                remaining[..gap].to_string(),
                self.default_type,
                (self.cursor..self.cursor + gap).into(),
            )
        });

        let matched_token = best.map(|(named, m)| {
            let raw = &remaining[m.span.range()];
            let text = match self.normalizations {
                Some(normalizations) => normalizations.apply(raw),
                None => raw.to_string(),
            };
            trace!("Matched '{}' as {}", raw.escape_default(), named.name);
            Token::new(text, &named.name, m.span.shifted(self.cursor)).with_sub_matches(m.groups)
        });

        // Advance by the length of the original text, normalization never changes segmentation.
        let consumed = matched_token
            .as_ref()
            .map_or(remaining.len(), |t| t.span.end - self.cursor);
        self.cursor += consumed;

        match (gap_token, matched_token) {
            (Some(gap_token), matched_token) => {
                self.pending = matched_token;
                Some(Ok(gap_token))
            }
            (None, Some(matched_token)) => Some(Ok(matched_token)),
            // Unreachable: the remaining input is not empty, so there is either a gap or a match.
            (None, None) => None,
        }
    }

    // Runs all matchers against the remaining input and returns the one whose match starts
    // earliest. On equal start positions the matcher that comes first in the set wins.
    fn earliest_match(&mut self) -> Result<Option<(&'s NamedMatcher, PatternMatch)>> {
        let matchers = self.matchers;
        let input = self.input;
        let remaining = &input[self.cursor..];
        let mut best: Option<(&'s NamedMatcher, PatternMatch)> = None;
        let mut best_start = remaining.len();
        for (index, named) in matchers.iter().enumerate() {
            let Some(m) = self.find_from_cursor(index, named, remaining)? else {
                continue;
            };
            if m.is_empty() {
                trace!("Ignoring empty match of '{}'", named.name);
                continue;
            }
            if m.start() < best_start {
                best_start = m.start();
                best = Some((named, m));
            }
        }
        Ok(best)
    }

    // Returns the match of the matcher at `index` in `remaining`.
    // A look-free matcher finds the same match again as long as that match doesn't start before
    // the cursor, and finds nothing again once it found nothing, so its last result is reused.
    fn find_from_cursor(
        &mut self,
        index: usize,
        named: &NamedMatcher,
        remaining: &str,
    ) -> Result<Option<PatternMatch>> {
        let cursor = self.cursor;
        match &self.cached[index] {
            CachedMatch::Missing => return Ok(None),
            CachedMatch::Found(m) if m.start() >= cursor => {
                return Ok(Some(PatternMatch {
                    span: Span::new(m.start() - cursor, m.end() - cursor),
                    groups: m.groups.clone(),
                }));
            }
            _ => (),
        }

        let found = named.matcher.find(remaining);
        if let Some(m) = &found {
            if m.end() > remaining.len()
                || m.start() > m.end()
                || !remaining.is_char_boundary(m.start())
                || !remaining.is_char_boundary(m.end())
            {
                return Err(TokscanError::new(TokscanErrorKind::InternalInvariant(
                    format!(
                        "Matcher '{}' reported the invalid span {} for a haystack of {} bytes",
                        named.name,
                        m.span,
                        remaining.len()
                    ),
                )));
            }
        }
        if self.look_free[index] {
            self.cached[index] = match &found {
                Some(m) => CachedMatch::Found(PatternMatch {
                    span: m.span.shifted(cursor),
                    groups: m.groups.clone(),
                }),
                None => CachedMatch::Missing,
            };
        }
        Ok(found)
    }

    fn fail(&mut self, msg: String) -> Option<Result<Token>> {
        self.failed = true;
        Some(Err(TokscanError::new(TokscanErrorKind::InternalInvariant(msg))))
    }
}

impl Iterator for ScanTokens<'_, '_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::{PatternMatcher, RegexMatcher};

    #[derive(Debug)]
    struct OutOfBounds;

    // Counts the searches and optionally hides that the wrapped matcher is look-free.
    #[derive(Debug)]
    struct Counting {
        inner: RegexMatcher,
        look_free: bool,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(pattern: &str, look_free: bool) -> Arc<Self> {
            Arc::new(Self {
                inner: RegexMatcher::new(pattern).unwrap(),
                look_free,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl PatternMatcher for Counting {
        fn find(&self, haystack: &str) -> Option<PatternMatch> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.find(haystack)
        }

        fn is_look_free(&self) -> bool {
            self.look_free && self.inner.is_look_free()
        }
    }

    fn scan_with(digits: Arc<Counting>, input: &str) -> Vec<Token> {
        let matchers = MatcherSet::new()
            .with("word", Arc::new(RegexMatcher::new(r"[a-z]+").unwrap()))
            .with("space", Arc::new(RegexMatcher::new(r" +").unwrap()))
            .with("digits", digits);
        ScanTokens::new(&matchers, "unknown", None, input)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    impl PatternMatcher for OutOfBounds {
        fn find(&self, haystack: &str) -> Option<PatternMatch> {
            Some(PatternMatch::new(Span::new(0, haystack.len() + 1)))
        }
    }

    #[test]
    fn test_gap_then_match() {
        let digits = RegexMatcher::new(r"\d+").unwrap();
        let matchers = MatcherSet::new().with("digits", Arc::new(digits));
        let mut iter = ScanTokens::new(&matchers, "unknown", None, "ab12c");
        let gap = iter.next().unwrap().unwrap();
        assert_eq!((gap.text(), gap.token_type()), ("ab", "unknown"));
        assert_eq!(iter.offset(), 4);
        let digits = iter.next().unwrap().unwrap();
        assert_eq!((digits.text(), digits.token_type()), ("12", "digits"));
        assert_eq!(digits.span(), Span::new(2, 4));
        let rest = iter.next().unwrap().unwrap();
        assert_eq!((rest.text(), rest.token_type()), ("c", "unknown"));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_empty_matches_are_ignored() {
        let as_ = RegexMatcher::new(r"a*").unwrap();
        let matchers = MatcherSet::new().with("as", Arc::new(as_));
        let tokens = ScanTokens::new(&matchers, "unknown", None, "baa")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text()).collect();
        // `a*` matches the empty string in front of `b`, so the whole input is unmatched.
        assert_eq!(texts, vec!["baa"]);
    }

    #[test]
    fn test_missing_match_is_searched_once() {
        let input = "lorem ipsum dolor sit amet";
        let cached = Counting::new(r"\d+", true);
        let tokens = scan_with(Arc::clone(&cached), input);
        assert_eq!(tokens.len(), 9);
        assert_eq!(cached.calls(), 1);

        let uncached = Counting::new(r"\d+", false);
        assert_eq!(scan_with(Arc::clone(&uncached), input), tokens);
        assert_eq!(uncached.calls(), 9);
    }

    #[test]
    fn test_later_match_is_reused() {
        let input = "ab cd 12 ef 34";
        let cached = Counting::new(r"(\d)\d", true);
        let tokens = scan_with(Arc::clone(&cached), input);
        let uncached = Counting::new(r"(\d)\d", false);
        assert_eq!(scan_with(Arc::clone(&uncached), input), tokens);

        let digits: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type() == "digits")
            .map(|t| (t.text(), t.span(), t.sub_matches.clone()))
            .collect();
        assert_eq!(
            digits,
            vec![
                ("12", Span::new(6, 8), vec![Some("1".to_string())]),
                ("34", Span::new(12, 14), vec![Some("3".to_string())]),
            ]
        );
        // Searched at the start and after `12`, the match `34` ends the input.
        assert_eq!(cached.calls(), 2);
        assert!(uncached.calls() > cached.calls());
    }

    #[test]
    fn test_invalid_span_is_reported() {
        let matchers = MatcherSet::new().with("broken", Arc::new(OutOfBounds));
        let mut iter = ScanTokens::new(&matchers, "unknown", None, "abc");
        let err = iter.next().unwrap().unwrap_err();
        assert!(matches!(err.kind(), TokscanErrorKind::InternalInvariant(_)));
        assert!(iter.next().is_none());
    }
}
