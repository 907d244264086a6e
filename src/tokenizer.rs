use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    annotate_occurrences, MatcherSet, NormalizationSet, OccurrenceAnnotation, Result, Scanner,
    TokenRecord, TokscanError, TokscanErrorKind, NUMBER, PUNCTUATION, UNKNOWN, WHITESPACE, WORD,
};

/// The configuration of a [tokenize] call.
///
/// Words and numbers are included by default, punctuation and whitespace are not.
///
/// With the `serde` feature the configuration can be read from JSON with camelCase keys, e.g.
/// `{"text": "Hello, world!", "includePunctuation": true}`. Missing keys take their defaults,
/// unknown keys are rejected. The matchers and the normalization set can't be expressed in JSON
/// and always take their defaults.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, rename_all = "camelCase", deny_unknown_fields)
)]
pub struct TokenizerConfig {
    /// The text to tokenize.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "text_or_empty"))]
    pub text: String,
    /// Keep tokens of type `word`.
    pub include_words: bool,
    /// Keep tokens of type `number`.
    pub include_numbers: bool,
    /// Keep tokens of type `punctuation`.
    pub include_punctuation: bool,
    /// Keep tokens of type `whitespace`.
    pub include_whitespace: bool,
    /// Use the greedy word and number matchers that join words by hyphens and apostrophes and
    /// numbers by separators.
    pub greedy: bool,
    /// Return token records instead of plain texts.
    pub verbose: bool,
    /// Annotate each token with its occurrence among the tokens with the same text.
    pub occurrences: bool,
    /// The matchers, see [MatcherSet::default] for the built-in ones.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub matchers: MatcherSet,
    /// Normalize the text of matched tokens.
    pub normalize: bool,
    /// The normalization set used if `normalize` is set.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub normalizations: NormalizationSet,
    /// The token type of text no matcher recognizes.
    pub default_type: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            include_words: true,
            include_numbers: true,
            include_punctuation: false,
            include_whitespace: false,
            greedy: false,
            verbose: false,
            occurrences: false,
            matchers: MatcherSet::default(),
            normalize: false,
            normalizations: NormalizationSet::standard(),
            default_type: UNKNOWN.to_string(),
        }
    }
}

// Keys of options that only exist as Rust values.
#[cfg(feature = "serde")]
const CODE_ONLY_KEYS: &[&str] = &["matchers", "normalizations"];

// `null` is accepted as empty text, any other non-string value is rejected.
#[cfg(feature = "serde")]
fn text_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TokenizerConfig {
    /// Creates a default configuration for the given text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Reads a configuration from a JSON value.
    #[cfg(feature = "serde")]
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        if let Some(key) = value
            .as_object()
            .and_then(|o| CODE_ONLY_KEYS.iter().find(|k| o.contains_key(**k)))
        {
            return Err(TokscanError::new(TokscanErrorKind::InvalidInput(format!(
                "'{key}' can't be read from JSON, set it with TokenizerConfig::with_{key}"
            ))));
        }
        serde_json::from_value(value)
            .map_err(|e| TokscanError::new(TokscanErrorKind::InvalidInput(e.to_string())))
    }

    /// Reads a configuration from a JSON string.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| TokscanError::new(TokscanErrorKind::InvalidInput(e.to_string())))?;
        Self::from_json(value)
    }

    /// Sets the text to tokenize.
    pub fn with_text(self, text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..self
        }
    }

    /// Sets whether words are kept.
    pub fn with_words(self, include_words: bool) -> Self {
        Self {
            include_words,
            ..self
        }
    }

    /// Sets whether numbers are kept.
    pub fn with_numbers(self, include_numbers: bool) -> Self {
        Self {
            include_numbers,
            ..self
        }
    }

    /// Sets whether punctuation is kept.
    pub fn with_punctuation(self, include_punctuation: bool) -> Self {
        Self {
            include_punctuation,
            ..self
        }
    }

    /// Sets whether whitespace is kept.
    pub fn with_whitespace(self, include_whitespace: bool) -> Self {
        Self {
            include_whitespace,
            ..self
        }
    }

    /// Sets whether the greedy word and number matchers are used.
    pub fn with_greedy(self, greedy: bool) -> Self {
        Self { greedy, ..self }
    }

    /// Sets whether token records are returned.
    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    /// Sets whether occurrence annotations are computed.
    pub fn with_occurrences(self, occurrences: bool) -> Self {
        Self {
            occurrences,
            ..self
        }
    }

    /// Sets the matchers.
    pub fn with_matchers(self, matchers: MatcherSet) -> Self {
        Self { matchers, ..self }
    }

    /// Sets whether matched tokens are normalized.
    pub fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    /// Sets the normalization set and enables normalization.
    pub fn with_normalizations(self, normalizations: NormalizationSet) -> Self {
        Self {
            normalize: true,
            normalizations,
            ..self
        }
    }

    /// Sets the token type of unmatched text.
    pub fn with_default_type(self, default_type: &str) -> Self {
        Self {
            default_type: default_type.to_string(),
            ..self
        }
    }

    /// The token types that survive filtering, in the order words, numbers, whitespace,
    /// punctuation.
    pub fn enabled_types(&self) -> Vec<&'static str> {
        [
            (self.include_words, WORD),
            (self.include_numbers, NUMBER),
            (self.include_whitespace, WHITESPACE),
            (self.include_punctuation, PUNCTUATION),
        ]
        .into_iter()
        .filter_map(|(enabled, token_type)| enabled.then_some(token_type))
        .collect()
    }

    /// The matchers used for scanning, with the greedy variants substituted if requested.
    pub fn effective_matchers(&self) -> MatcherSet {
        if self.greedy {
            self.matchers.greedy()
        } else {
            self.matchers.clone()
        }
    }

    /// Checks that every enabled token type has a matcher and that all matchers are named.
    pub fn validate(&self, matchers: &MatcherSet) -> Result<()> {
        if matchers.names().any(str::is_empty) {
            return Err(TokscanError::new(TokscanErrorKind::MatcherConfiguration(
                "Matcher names must not be empty".to_string(),
            )));
        }
        if let Some(missing) = self
            .enabled_types()
            .into_iter()
            .find(|token_type| !matchers.contains(token_type))
        {
            return Err(TokscanError::new(TokscanErrorKind::MatcherConfiguration(
                format!("Token type '{missing}' is included, but there is no matcher for it"),
            )));
        }
        Ok(())
    }

    /// Tokenizes the configured text, see [tokenize].
    pub fn tokenize(&self) -> Result<TokenizeOutput> {
        tokenize(self)
    }
}

/// The result of a [tokenize] call.
///
/// With the `serde` feature the output serializes to a JSON array of strings or of token records.
/// An empty verbose output serializes to `[]` as well and reads back as an empty
/// [TokenizeOutput::Plain], so compare deserialized outputs by [Self::texts] and [Self::records].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TokenizeOutput {
    /// The token texts.
    Plain(Vec<String>),
    /// The token records, returned in verbose mode.
    Verbose(Vec<TokenRecord>),
}

impl TokenizeOutput {
    /// Returns the token texts, regardless of the mode.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            TokenizeOutput::Plain(texts) => texts.iter().map(String::as_str).collect(),
            TokenizeOutput::Verbose(records) => records.iter().map(TokenRecord::text).collect(),
        }
    }

    /// Returns the token records if the output is verbose.
    pub fn records(&self) -> Option<&[TokenRecord]> {
        match self {
            TokenizeOutput::Plain(_) => None,
            TokenizeOutput::Verbose(records) => Some(records),
        }
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        match self {
            TokenizeOutput::Plain(texts) => texts.len(),
            TokenizeOutput::Verbose(records) => records.len(),
        }
    }

    /// Checks if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tokenizes `config.text`.
///
/// The text is scanned with the configured matchers (or their greedy variants), matched tokens are
/// normalized if requested, and the token stream is filtered down to the enabled token types.
/// Occurrence annotations are computed on the filtered stream.
///
/// An empty text always yields an empty output. Otherwise the call fails with a matcher
/// configuration error if an enabled token type has no matcher.
pub fn tokenize(config: &TokenizerConfig) -> Result<TokenizeOutput> {
    if config.text.is_empty() {
        return Ok(if config.verbose {
            TokenizeOutput::Verbose(Vec::new())
        } else {
            TokenizeOutput::Plain(Vec::new())
        });
    }
    let matchers = config.effective_matchers();
    config.validate(&matchers)?;

    let mut scanner = Scanner::new(matchers).with_default_type(&config.default_type);
    if config.normalize {
        scanner = scanner.with_normalizations(config.normalizations.clone());
    }
    let types = config.enabled_types();
    let tokens = scanner
        .scan_iter(&config.text)
        .filter(|token| {
            token
                .as_ref()
                .map_or(true, |t| types.iter().any(|ty| *ty == t.token_type()))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Tokenized {} bytes into {} tokens of types {:?}",
        config.text.len(),
        tokens.len(),
        types
    );

    if !config.verbose {
        return Ok(TokenizeOutput::Plain(
            tokens.into_iter().map(|t| t.text).collect(),
        ));
    }
    let annotations: Vec<Option<OccurrenceAnnotation>> = if config.occurrences {
        annotate_occurrences(&tokens).into_iter().map(Some).collect()
    } else {
        vec![None; tokens.len()]
    };
    Ok(TokenizeOutput::Verbose(
        tokens
            .into_iter()
            .zip(annotations)
            .map(|(token, annotation)| TokenRecord { token, annotation })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_enabled_types_order() {
        let config = TokenizerConfig::default()
            .with_punctuation(true)
            .with_whitespace(true);
        assert_eq!(
            config.enabled_types(),
            vec![WORD, NUMBER, WHITESPACE, PUNCTUATION]
        );
        assert_eq!(
            TokenizerConfig::default().enabled_types(),
            vec![WORD, NUMBER]
        );
    }

    #[test]
    fn test_missing_matcher() {
        init();
        let config = TokenizerConfig::new("a b")
            .with_matchers(MatcherSet::new().with(WORD, crate::word()))
            .with_numbers(false)
            .with_whitespace(true);
        let err = tokenize(&config).unwrap_err();
        assert!(matches!(
            err.kind(),
            TokscanErrorKind::MatcherConfiguration(msg) if msg.contains("whitespace")
        ));
    }

    #[test]
    fn test_empty_text_skips_matcher_validation() {
        init();
        let config = TokenizerConfig::default().with_matchers(MatcherSet::new());
        assert_eq!(tokenize(&config).unwrap(), TokenizeOutput::Plain(Vec::new()));
        let config = config.with_whitespace(true).with_verbose(true);
        assert_eq!(
            tokenize(&config).unwrap(),
            TokenizeOutput::Verbose(Vec::new())
        );
        assert!(tokenize(&config.with_text("a")).is_err());
    }

    #[test]
    fn test_greedy_fills_missing_word_matcher() {
        let config = TokenizerConfig::new("well-known")
            .with_matchers(MatcherSet::new().with(PUNCTUATION, crate::punctuation()))
            .with_greedy(true);
        assert_eq!(tokenize(&config).unwrap().texts(), vec!["well-known"]);
    }

    #[test]
    fn test_occurrences_without_verbose_are_plain() {
        let config = TokenizerConfig::new("cat cat").with_occurrences(true);
        assert_eq!(
            tokenize(&config).unwrap(),
            TokenizeOutput::Plain(vec!["cat".to_string(), "cat".to_string()])
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config = TokenizerConfig::from_json(serde_json::json!({
            "text": "Hello, world!",
            "includePunctuation": true,
            "greedy": true
        }))
        .unwrap();
        assert_eq!(config.text, "Hello, world!");
        assert!(config.include_punctuation);
        assert!(config.greedy);
        assert!(config.include_words);
        assert!(!config.include_whitespace);
        assert_eq!(config.default_type, UNKNOWN);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = TokenizerConfig::from_json_str(r#"{"text": "a 1", "includeNumber": false}"#)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            TokscanErrorKind::InvalidInput(msg) if msg.contains("includeNumber")
        ));
        let err =
            TokenizerConfig::from_json(serde_json::json!({ "text": "a", "parsers": {} }))
                .unwrap_err();
        assert!(matches!(err.kind(), TokscanErrorKind::InvalidInput(_)));
        let err = TokenizerConfig::from_json(serde_json::json!({ "matchers": [] })).unwrap_err();
        assert!(matches!(
            err.kind(),
            TokscanErrorKind::InvalidInput(msg) if msg.contains("with_matchers")
        ));
        let err = TokenizerConfig::from_json_str("{\"text\": ").unwrap_err();
        assert!(matches!(err.kind(), TokscanErrorKind::InvalidInput(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_text_types() {
        let null_text = TokenizerConfig::from_json(serde_json::json!({ "text": null })).unwrap();
        assert!(tokenize(&null_text).unwrap().is_empty());
        let absent_text = TokenizerConfig::from_json_str("{}").unwrap();
        assert!(absent_text.text.is_empty());
        let err = TokenizerConfig::from_json(serde_json::json!({ "text": 42 })).unwrap_err();
        assert!(matches!(err.kind(), TokscanErrorKind::InvalidInput(_)));
        let err = TokenizerConfig::from_json(serde_json::json!({ "text": ["a"] })).unwrap_err();
        assert!(matches!(err.kind(), TokscanErrorKind::InvalidInput(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_empty_verbose_output_reads_back_as_plain() {
        let output = tokenize(&TokenizerConfig::default().with_verbose(true)).unwrap();
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, "[]");
        let read: TokenizeOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(read, TokenizeOutput::Plain(Vec::new()));
        assert_eq!(read.texts(), output.texts());
        assert_eq!(read.records().unwrap_or_default(), output.records().unwrap_or_default());
    }
}
