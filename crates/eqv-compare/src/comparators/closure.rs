use eqv_types::{export, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Closures are equal only when they are the same closure.
pub struct ClosureComparator;

impl Comparator for ClosureComparator {
    fn name(&self) -> &str {
        "closure"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::Closure(_), Value::Closure(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        _ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Value::Closure(e), Value::Closure(a)) = (expected, actual) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "closure comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        if e.ptr_eq(a) {
            return Ok(());
        }
        Err(ComparatorError::failure(
            expected,
            actual,
            export(expected),
            export(actual),
            format!(
                "Failed asserting that closure declared at {}:{} is equal to closure declared at {}:{}.",
                a.file(),
                a.line(),
                e.file(),
                e.line()
            ),
        ))
    }
}
