use std::str::FromStr;

use bigdecimal::BigDecimal;
use eqv_types::{is_numeric, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;
use crate::tolerance::decimals_within_tolerance;

/// Compares arbitrary-precision decimals against decimals, integers and
/// numeric strings, at the precision of the more precise operand.
pub struct DecimalComparator;

fn is_operand(value: &Value) -> bool {
    match value {
        Value::Decimal(_) | Value::Int(_) => true,
        Value::Str(s) => is_numeric(s),
        _ => false,
    }
}

fn to_decimal(value: &Value) -> Result<BigDecimal, ComparatorError> {
    match value {
        Value::Decimal(d) => Ok(d.clone()),
        Value::Int(i) => Ok(BigDecimal::from(*i)),
        Value::Str(s) => BigDecimal::from_str(s.trim())
            .map_err(|_| ComparatorError::InvalidOperand(format!("'{s}' is not a decimal number"))),
        other => Err(ComparatorError::InvalidOperand(format!(
            "{} is not a decimal operand",
            other.type_name()
        ))),
    }
}

impl Comparator for DecimalComparator {
    fn name(&self) -> &str {
        "decimal"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        (matches!(expected, Value::Decimal(_)) || matches!(actual, Value::Decimal(_)))
            && is_operand(expected)
            && is_operand(actual)
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let e = to_decimal(expected)?;
        let a = to_decimal(actual)?;

        if !decimals_within_tolerance(&e, &a, ctx.options().delta)? {
            return Err(ComparatorError::failure(
                expected,
                actual,
                e.to_string(),
                a.to_string(),
                "Failed asserting that two decimal numbers are equal.",
            ));
        }
        Ok(())
    }
}
