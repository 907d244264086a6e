#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Span;

/// A classified, contiguous piece of the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Token {
    /// The token text. It is normalized if normalization was requested.
    pub text: String,
    /// The token type, i.e. the name of the matcher or the default type for unmatched text.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub token_type: String,
    /// The sub-groups captured by the matcher.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub sub_matches: Vec<Option<String>>,
    /// The byte range of the token in the input. It always refers to the text before
    /// normalization.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(text: String, token_type: &str, span: Span) -> Self {
        Self {
            text,
            token_type: token_type.to_string(),
            sub_matches: Vec::new(),
            span,
        }
    }

    /// Set the captured sub-groups.
    pub fn with_sub_matches(self, sub_matches: Vec<Option<String>>) -> Self {
        Self {
            sub_matches,
            ..self
        }
    }

    /// Get the token text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the token type.
    #[inline]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Get the span of the token.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }
}

/// The position of a token among all tokens with the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccurrenceAnnotation {
    /// The 1-based rank of the token among the tokens with the same text.
    pub occurrence: usize,
    /// The number of tokens with the same text.
    pub occurrences: usize,
}

/// A token as returned by the tokenizer in verbose mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenRecord {
    /// The token.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub token: Token,
    /// The occurrence annotation, if requested.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub annotation: Option<OccurrenceAnnotation>,
}

impl TokenRecord {
    /// Create a new record without annotation.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            annotation: None,
        }
    }

    /// Get the token text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.token.text
    }

    /// Get the token type.
    #[inline]
    pub fn token_type(&self) -> &str {
        &self.token.token_type
    }

    /// Get the 1-based occurrence of the token text, if annotated.
    #[inline]
    pub fn occurrence(&self) -> Option<usize> {
        self.annotation.map(|a| a.occurrence)
    }

    /// Get the number of occurrences of the token text, if annotated.
    #[inline]
    pub fn occurrences(&self) -> Option<usize> {
        self.annotation.map(|a| a.occurrences)
    }
}

impl From<Token> for TokenRecord {
    fn from(token: Token) -> Self {
        Self::new(token)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let token = Token::new("cat".to_string(), "word", Span::new(0, 3));
        let record = TokenRecord {
            token,
            annotation: Some(OccurrenceAnnotation {
                occurrence: 1,
                occurrences: 2,
            }),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "cat",
                "type": "word",
                "span": { "start": 0, "end": 3 },
                "occurrence": 1,
                "occurrences": 2
            })
        );
        let back: TokenRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_keeps_sub_matches() {
        let token = Token::new(",".to_string(), "punctuation", Span::new(5, 6))
            .with_sub_matches(vec![Some(",".to_string()), None]);
        let json = serde_json::to_value(TokenRecord::new(token)).unwrap();
        assert_eq!(json["subMatches"], serde_json::json!([",", null]));
        assert!(json.get("occurrence").is_none());
    }
}
