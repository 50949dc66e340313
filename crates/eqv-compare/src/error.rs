use eqv_types::Value;

use crate::failure::ComparisonFailure;

/// Errors that can occur during a comparison.
///
/// [`ComparatorError::Failure`] is the ordinary "not equal" outcome; composite
/// comparators catch it from their members. Every other variant is a defect
/// in the caller's setup and propagates unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ComparatorError {
    /// The two values are not equal.
    #[error("{0}")]
    Failure(Box<ComparisonFailure>),

    /// No registered comparator accepts the pair.
    #[error("no comparator found for expected {expected} and actual {actual}")]
    NoComparatorFound { expected: String, actual: String },

    /// A comparator was handed a value outside its contract.
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// The comparison options are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The process-wide registry could not be locked.
    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),
}

impl ComparatorError {
    /// Build a comparison failure.
    pub fn failure(
        expected: &Value,
        actual: &Value,
        expected_as_string: impl Into<String>,
        actual_as_string: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ComparisonFailure::new(
            expected.clone(),
            actual.clone(),
            expected_as_string,
            actual_as_string,
            message,
        )
        .into()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Split a comparison failure from every other error.
    pub fn into_failure(self) -> Result<ComparisonFailure, ComparatorError> {
        match self {
            Self::Failure(failure) => Ok(*failure),
            other => Err(other),
        }
    }
}

impl From<ComparisonFailure> for ComparatorError {
    fn from(failure: ComparisonFailure) -> Self {
        Self::Failure(Box::new(failure))
    }
}
