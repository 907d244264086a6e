use crate::{MatcherSet, NormalizationSet, Result, ScanTokens, Token, UNKNOWN};

/// A Scanner.
/// It splits a text into tokens with the help of an ordered set of named matchers.
///
/// In each step all matchers are run against the rest of the input and the match that starts
/// earliest wins. If several matchers find a match at the same position, the matcher that comes
/// first in the [MatcherSet] wins. Text in front of the winning match becomes a token of the
/// default type, and so does the rest of the input if no matcher finds anything.
///
/// The tokens cover the input without gaps or overlaps. If a normalization set is configured, the
/// text of matched tokens is normalized, but their spans still refer to the original input.
#[derive(Debug, Clone)]
pub struct Scanner {
    matchers: MatcherSet,
    default_type: String,
    normalizations: Option<NormalizationSet>,
}

impl Scanner {
    /// Creates a new scanner with the given matchers.
    pub fn new(matchers: MatcherSet) -> Self {
        Self {
            matchers,
            default_type: UNKNOWN.to_string(),
            normalizations: None,
        }
    }

    /// Sets the token type used for text no matcher recognizes.
    /// An empty type falls back to `unknown`.
    pub fn with_default_type(self, default_type: &str) -> Self {
        Self {
            default_type: default_or_unknown(default_type).to_string(),
            ..self
        }
    }

    /// Sets the normalization applied to the text of matched tokens.
    pub fn with_normalizations(self, normalizations: NormalizationSet) -> Self {
        Self {
            normalizations: Some(normalizations),
            ..self
        }
    }

    /// Get the matchers.
    #[inline]
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Get the default token type.
    #[inline]
    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Returns an iterator over the tokens of `input`.
    pub fn scan_iter<'s, 'h>(&'s self, input: &'h str) -> ScanTokens<'s, 'h> {
        ScanTokens::new(
            &self.matchers,
            &self.default_type,
            self.normalizations.as_ref(),
            input,
        )
    }

    /// Splits `input` into tokens.
    pub fn scan(&self, input: &str) -> Result<Vec<Token>> {
        self.scan_iter(input).collect()
    }
}

/// Splits `text` into tokens with the given matchers, without filtering.
///
/// Unmatched text is typed `default_type` (`unknown` if empty). If `normalizations` is given, it is
/// applied to the text of every matched token.
pub fn classify_tokens(
    text: &str,
    matchers: &MatcherSet,
    default_type: &str,
    normalizations: Option<&NormalizationSet>,
) -> Result<Vec<Token>> {
    ScanTokens::new(
        matchers,
        default_or_unknown(default_type),
        normalizations,
        text,
    )
    .collect()
}

#[inline]
fn default_or_unknown(default_type: &str) -> &str {
    if default_type.is_empty() {
        UNKNOWN
    } else {
        default_type
    }
}
