use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use eqv_types::Value;
use tracing::trace;

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

const RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

/// Compares date-times as instants, within a window of `delta` seconds.
pub struct DateTimeComparator;

/// `delta` seconds split into whole seconds and the nanosecond remainder.
fn window(delta: f64) -> Result<TimeDelta, ComparatorError> {
    let delta = delta.abs();
    let out_of_range = || {
        ComparatorError::InvalidOperand(format!("delta {delta} is not a representable duration"))
    };
    if !delta.is_finite() || delta >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    let seconds = delta.trunc() as i64;
    let nanos = ((delta - delta.trunc()) * 1e9).round() as i64;
    TimeDelta::try_seconds(seconds)
        .and_then(|s| s.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(out_of_range)
}

fn render(value: &DateTime<FixedOffset>) -> String {
    value.format(RENDER_FORMAT).to_string()
}

impl Comparator for DateTimeComparator {
    fn name(&self) -> &str {
        "datetime"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::DateTime(_), Value::DateTime(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Value::DateTime(e), Value::DateTime(a)) = (expected, actual) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "date-time comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        let window = window(ctx.options().delta)?;
        let e_utc = e.with_timezone(&Utc);
        let a_utc = a.with_timezone(&Utc);
        // Saturate at the calendar bounds.
        let lower = e_utc.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let upper = e_utc.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC);
        trace!(%lower, %upper, actual = %a_utc, "date-time window");

        if a_utc < lower || a_utc > upper {
            return Err(ComparatorError::failure(
                expected,
                actual,
                render(e),
                render(a),
                "Failed asserting that two DateTime objects are equal.",
            ));
        }
        Ok(())
    }
}
