//! Module with the normalization rules applied to token text.
use std::sync::LazyLock;

use regex::Regex;

use crate::{matcher_set::WHITESPACE_CLASS, Result, TokscanError, TokscanErrorKind};

/// A rewrite rule: every match of the pattern is replaced by the replacement.
///
/// The replacement may refer to capture groups of the pattern with `$1` or `${name}`.
#[derive(Debug, Clone)]
pub struct NormalizationRule {
    pattern: Regex,
    replacement: String,
}

impl NormalizationRule {
    /// Create a new normalization rule.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            TokscanError::new(TokscanErrorKind::RegexError(e, pattern.to_string()))
        })?;
        Ok(Self::from_regex(pattern, replacement))
    }

    /// Create a new normalization rule from an already compiled regex.
    pub fn from_regex(pattern: Regex, replacement: &str) -> Self {
        Self {
            pattern,
            replacement: replacement.to_string(),
        }
    }

    /// Get the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Get the replacement.
    #[inline]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply the rule to the given text.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// An ordered list of normalization rules.
/// Each rule is applied to the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct NormalizationSet {
    rules: Vec<NormalizationRule>,
}

static DEFAULT_SET: LazyLock<NormalizationSet> = LazyLock::new(|| {
    NormalizationSet::new()
        // zero width space
        .with(builtin_rule(r"\u{200B}", ""))
        .with(builtin_rule(&format!("{WHITESPACE_CLASS}+"), " "))
});

static DESTRUCTIVE_SET: LazyLock<NormalizationSet> = LazyLock::new(|| {
    DEFAULT_SET
        .clone()
        .with(builtin_rule(r"[\u{2018}\u{2019}\u{201B}]", "'"))
        .with(builtin_rule(r"[\u{201C}\u{201D}\u{201F}]", "\""))
        .with(builtin_rule(
            &format!("^{WHITESPACE_CLASS}+|{WHITESPACE_CLASS}+$"),
            "",
        ))
});

fn builtin_rule(pattern: &str, replacement: &str) -> NormalizationRule {
    NormalizationRule::new(pattern, replacement).expect("built-in patterns are valid")
}

impl NormalizationSet {
    /// Create an empty normalization set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default set: removes zero width spaces and collapses whitespace runs into a single
    /// space.
    pub fn standard() -> Self {
        DEFAULT_SET.clone()
    }

    /// The default set extended by rules that lose information: typographic quotes are folded to
    /// their ASCII counterparts and leading and trailing whitespace is removed.
    pub fn destructive() -> Self {
        DESTRUCTIVE_SET.clone()
    }

    /// Append a rule to the set.
    pub fn with(mut self, rule: NormalizationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the rules of the set in application order.
    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Checks if the set has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules in order to the given text.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

/// Applies the normalization set to `text` and returns the result as a new string.
pub fn normalizer(text: &str, normalizations: &NormalizationSet) -> String {
    normalizations.apply(text)
}

/// Applies the [NormalizationSet::destructive] set to `text`.
pub fn normalizer_destructive(text: &str) -> String {
    DESTRUCTIVE_SET.apply(text)
}
