use eqv_types::{shortened_export, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Fallback for pairs no other comparator accepts. Accepts everything and
/// always fails.
pub struct TypeComparator;

impl Comparator for TypeComparator {
    fn name(&self) -> &str {
        "type"
    }

    fn accepts(&self, _expected: &Value, _actual: &Value) -> bool {
        true
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        _ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        Err(ComparatorError::failure(
            expected,
            actual,
            "",
            "",
            format!(
                "{} does not match expected type \"{}\".",
                shortened_export(actual),
                expected.type_name()
            ),
        ))
    }
}
