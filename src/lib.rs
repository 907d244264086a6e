#![forbid(missing_docs)]
//! # `tokscan`
//! The `tokscan` crate is a configurable tokenizer. It splits a text into typed tokens, i.e.
//! words, numbers, punctuation, whitespace and unknown text, with the help of an ordered set of
//! independent pattern matchers.
//! In each step the matcher whose match starts earliest wins, text in front of the match becomes
//! a token of the default type `unknown`. The tokens always cover the whole input.
//!
//! On top of the scanner the [tokenize] function provides
//! - greedy word and number matchers that keep `well-known` or `10:30` together,
//! - normalization of the token text with ordered rewrite rules,
//! - filtering by token type,
//! - occurrence annotations, i.e. the rank and count of tokens with the same text.
//!
//! # Example
//! ```rust
//! use tokscan::{tokenize, TokenizerConfig};
//!
//! let config = TokenizerConfig::new("Hello, well-known world!")
//!     .with_punctuation(true)
//!     .with_greedy(true);
//! let tokens = tokenize(&config).expect("tokenize error");
//! assert_eq!(tokens.texts(), vec!["Hello", ",", "well-known", "world", "!"]);
//! ```
//!
//! The scanner can also be used directly to get the unfiltered token stream:
//! ```rust
//! use tokscan::{MatcherSet, Scanner};
//!
//! let scanner = Scanner::new(MatcherSet::default());
//! for token in scanner.scan_iter("a, b") {
//!     let token = token.expect("scan error");
//!     println!("{:?}: '{}' at {}", token.token_type(), token.text(), token.span());
//! }
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Tokens and records can be serialized and a
//!   [TokenizerConfig] can be read from JSON.

/// Module with error definitions
mod errors;
pub use errors::{Result, TokscanError, TokscanErrorKind};

/// Module with the ordered matcher set and the built-in matchers
mod matcher_set;
pub use matcher_set::{
    greedy_number, greedy_word, number, punctuation, whitespace, word, MatcherSet, NamedMatcher,
    NUMBER, PUNCTUATION, UNKNOWN, WHITESPACE, WORD,
};

/// Module with the normalization rules
mod normalization;
pub use normalization::{normalizer, normalizer_destructive, NormalizationRule, NormalizationSet};

/// Module with occurrence counting
mod occurrences;
pub use occurrences::{
    annotate_occurrences, occurrence_in_string, occurrence_in_tokens, occurrences_in_string,
    occurrences_in_tokens,
};

/// Module that provides the PatternMatcher trait and a regex based implementation
mod pattern;
pub use pattern::{PatternMatch, PatternMatcher, RegexMatcher};

/// Module that provides a ScanTokens type
mod scan_tokens;
pub use scan_tokens::ScanTokens;

/// The module with the scanner.
mod scanner;
pub use scanner::{classify_tokens, Scanner};

/// Module with the selection helpers
mod selection;
pub use selection::{
    selection_array, selections_to_ranges, splice_string_on_ranges, SelectedText, Selection,
};

/// Module that provides a Span type
mod span;
pub use span::Span;

/// Module that provides the Token type
mod token;
pub use token::{OccurrenceAnnotation, Token, TokenRecord};

/// The module with the tokenizer pipeline.
mod tokenizer;
pub use tokenizer::{tokenize, TokenizeOutput, TokenizerConfig};
