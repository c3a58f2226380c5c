use thiserror::Error;

/// Raised when a comparison is invoked with something other than two maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Both objects being compared must be instances of dictionaries")]
pub struct UsageError;

/// Raised when two compared maps are not equal.
///
/// The message is the rendered [`Report`](crate::Report) of all
/// divergences, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ComparisonFailure {
    message: String,
}

impl ComparisonFailure {
    pub(crate) fn new(message: String) -> ComparisonFailure {
        ComparisonFailure { message }
    }

    /// Returns the complete failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Iterates over the individual lines of the message.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }
}

/// The error returned by [`assert_dicts_equal`](crate::assert_dicts_equal).
///
/// This allows telling a bad invocation apart from a data mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Mismatch(#[from] ComparisonFailure),
}

impl CompareError {
    /// Is this a usage error?
    pub fn is_usage(&self) -> bool {
        matches!(self, CompareError::Usage(_))
    }

    /// Returns the comparison failure if this is one.
    pub fn as_mismatch(&self) -> Option<&ComparisonFailure> {
        match self {
            CompareError::Mismatch(failure) => Some(failure),
            CompareError::Usage(_) => None,
        }
    }
}

#[test]
fn test_messages() {
    assert_eq!(
        UsageError.to_string(),
        "Both objects being compared must be instances of dictionaries"
    );
    let err = CompareError::from(UsageError);
    assert!(err.is_usage());
    assert_eq!(err.to_string(), UsageError.to_string());

    let err = CompareError::from(ComparisonFailure::new("first\nsecond".into()));
    assert!(!err.is_usage());
    assert_eq!(err.to_string(), "first\nsecond");
    assert_eq!(
        err.as_mismatch().map(|x| x.lines().collect::<Vec<_>>()),
        Some(vec!["first", "second"])
    );
}
