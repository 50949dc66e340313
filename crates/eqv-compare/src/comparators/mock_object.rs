use eqv_types::{Value, MOCK_PROPERTY_PREFIX};

use crate::comparator::{Comparator, Comparison};
use crate::comparators::object::compare_objects;
use crate::error::ComparatorError;

/// Compares mock objects like objects, ignoring the mock framework's own
/// bookkeeping properties.
pub struct MockObjectComparator;

fn is_mock(value: &Value) -> bool {
    value.as_object().is_some_and(|o| o.borrow().is_mock())
}

impl Comparator for MockObjectComparator {
    fn name(&self) -> &str {
        "mock-object"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        is_mock(expected) && is_mock(actual)
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        compare_objects(expected, actual, ctx, |name| {
            !name.starts_with(MOCK_PROPERTY_PREFIX)
        })
    }
}
