use thiserror::Error;

/// The result type for the `tokscan` crate.
pub type Result<T> = std::result::Result<T, TokscanError>;

/// The error type for the `tokscan` crate.
#[derive(Error, Debug)]
pub struct TokscanError {
    /// The source of the error.
    pub source: Box<TokscanErrorKind>,
}

impl TokscanError {
    /// Create a new `TokscanError`.
    pub fn new(kind: TokscanErrorKind) -> Self {
        TokscanError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    #[inline]
    pub fn kind(&self) -> &TokscanErrorKind {
        &self.source
    }
}

impl std::fmt::Display for TokscanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum TokscanErrorKind {
    /// The text to tokenize or the configuration around it has an unusable shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The matcher set does not fit the requested configuration.
    #[error("Matcher configuration error: {0}")]
    MatcherConfiguration(String),

    /// The scanner detected a state it can't make progress from, usually caused by a misbehaving
    /// custom matcher.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// A matcher or normalization pattern could not be compiled.
    #[error("'{1}' {0}")]
    RegexError(regex::Error, String),
}

impl From<regex::Error> for TokscanError {
    fn from(error: regex::Error) -> Self {
        TokscanError::new(TokscanErrorKind::RegexError(error, "!".to_string()))
    }
}
