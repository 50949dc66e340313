use eqv_types::Value;

use crate::comparator::{Comparator, Comparison};
use crate::comparators::object::compare_objects;
use crate::error::ComparatorError;

/// Properties that depend on where an exception was raised.
const LOCATION_PROPERTIES: [&str; 5] = ["file", "line", "trace", "string", "xdebug_message"];

/// Compares exceptions like objects, ignoring where they were raised.
pub struct ExceptionComparator;

fn is_exception(value: &Value) -> bool {
    value.as_object().is_some_and(|o| o.borrow().is_exception())
}

impl Comparator for ExceptionComparator {
    fn name(&self) -> &str {
        "exception"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        is_exception(expected) && is_exception(actual)
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        compare_objects(expected, actual, ctx, |name| {
            !LOCATION_PROPERTIES.contains(&name)
        })
    }
}
