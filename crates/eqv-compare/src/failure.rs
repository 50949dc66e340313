use std::fmt;

use eqv_diff::unified_diff;
use eqv_types::Value;

// ---------------------------------------------------------------------------
// ComparisonFailure
// ---------------------------------------------------------------------------

/// Why two values are not equal.
///
/// Carries both values, a rendering of each for the line diff, and a
/// message. Either rendering may be empty, meaning no diff is available.
#[derive(Clone, Debug)]
pub struct ComparisonFailure {
    expected: Value,
    actual: Value,
    expected_as_string: String,
    actual_as_string: String,
    message: String,
}

impl ComparisonFailure {
    pub fn new(
        expected: Value,
        actual: Value,
        expected_as_string: impl Into<String>,
        actual_as_string: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            expected,
            actual,
            expected_as_string: expected_as_string.into(),
            actual_as_string: actual_as_string.into(),
            message: message.into(),
        }
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    pub fn expected_as_string(&self) -> &str {
        &self.expected_as_string
    }

    pub fn actual_as_string(&self) -> &str {
        &self.actual_as_string
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Unified diff of the two renderings, empty when either is empty.
    pub fn diff(&self) -> String {
        if self.expected_as_string.is_empty() || self.actual_as_string.is_empty() {
            return String::new();
        }
        unified_diff(&self.expected_as_string, &self.actual_as_string)
    }
}

impl fmt::Display for ComparisonFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let diff = self.diff();
        if !diff.is_empty() {
            write!(f, "\n{diff}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ComparisonResult
// ---------------------------------------------------------------------------

/// Outcome of a comparison that ran to completion.
#[derive(Clone, Debug)]
pub enum ComparisonResult {
    Equal,
    NotEqual(ComparisonFailure),
}

impl ComparisonResult {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    pub fn failure(&self) -> Option<&ComparisonFailure> {
        match self {
            Self::Equal => None,
            Self::NotEqual(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_diff() {
        let failure = ComparisonFailure::new(
            Value::from("string"),
            Value::from("other string"),
            "'string'",
            "'other string'",
            "Failed asserting that two strings are equal.",
        );
        assert_eq!(
            failure.to_string(),
            "Failed asserting that two strings are equal.\n--- Expected\n+++ Actual\n@@ @@\n-'string'\n+'other string'\n"
        );
    }

    #[test]
    fn empty_rendering_means_no_diff() {
        let failure = ComparisonFailure::new(
            Value::from(1),
            Value::from(2),
            "",
            "2",
            "Failed asserting that 2 matches expected 1.",
        );
        assert_eq!(failure.diff(), "");
        assert_eq!(
            failure.to_string(),
            "Failed asserting that 2 matches expected 1."
        );
    }

    #[test]
    fn result_accessors() {
        assert!(ComparisonResult::Equal.is_equal());
        assert!(ComparisonResult::Equal.failure().is_none());
        let failure = ComparisonFailure::new(Value::Null, Value::Bool(true), "", "", "m");
        let result = ComparisonResult::NotEqual(failure);
        assert!(!result.is_equal());
        assert_eq!(result.failure().map(ComparisonFailure::message), Some("m"));
    }
}
