use eqv_types::Value;

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Compares members of the same enumeration by identity.
pub struct EnumerationComparator;

impl Comparator for EnumerationComparator {
    fn name(&self) -> &str {
        "enumeration"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        match (expected, actual) {
            (Value::Enum(e), Value::Enum(a)) => e.enum_type() == a.enum_type(),
            _ => false,
        }
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        _ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Value::Enum(e), Value::Enum(a)) = (expected, actual) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "enumeration comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        if e != a {
            return Err(ComparatorError::failure(
                expected,
                actual,
                "",
                "",
                format!(
                    "Failed asserting that two values of enumeration {} are equal, {} does not match expected {}.",
                    e.enum_type(),
                    a.case(),
                    e.case()
                ),
            ));
        }
        Ok(())
    }
}
