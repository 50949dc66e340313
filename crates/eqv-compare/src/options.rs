use serde::{Deserialize, Serialize};

use crate::error::ComparatorError;

/// Options passed through every comparison of one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonOptions {
    /// Maximum absolute difference under which numbers, decimals and
    /// date-times (in seconds) are still equal. Used by absolute value.
    pub delta: f64,
    /// Sort array values before comparing them, discarding keys.
    pub canonicalize: bool,
    /// Compare strings and markup case-insensitively.
    pub ignore_case: bool,
}

impl ComparisonOptions {
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn canonicalized(mut self) -> Self {
        self.canonicalize = true;
        self
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// The tolerance as a non-negative number.
    pub fn abs_delta(&self) -> f64 {
        self.delta.abs()
    }

    pub fn validate(&self) -> Result<(), ComparatorError> {
        if self.delta.is_nan() {
            return Err(ComparatorError::Config("delta must be a number".into()));
        }
        Ok(())
    }
}
