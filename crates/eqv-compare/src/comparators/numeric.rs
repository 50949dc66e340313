use eqv_types::{export, parse_numeric, Number, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;
use crate::tolerance::within_tolerance;

/// Compares integers, floats and numeric strings within the delta.
pub struct NumericComparator;

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        Value::Str(s) => parse_numeric(s),
        _ => None,
    }
}

impl Comparator for NumericComparator {
    fn name(&self) -> &str {
        "numeric"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        !(expected.is_string() && actual.is_string())
            && as_number(expected).is_some()
            && as_number(actual).is_some()
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Some(e), Some(a)) = (as_number(expected), as_number(actual)) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "numeric comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        if !within_tolerance(e, a, ctx.options().delta) {
            return Err(ComparatorError::failure(
                expected,
                actual,
                "",
                "",
                format!(
                    "Failed asserting that {} matches expected {}.",
                    export(actual),
                    export(expected)
                ),
            ));
        }
        Ok(())
    }
}
