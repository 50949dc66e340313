use eqv_types::{export, to_array, Array, ObjectRef, Value};
use tracing::debug;

use crate::comparator::{Comparator, Comparison};
use crate::comparators::array::compare_arrays;
use crate::error::ComparatorError;

/// Compares objects of the same class by their properties.
///
/// Identity pairs already under comparison are treated as equal, so cyclic
/// object graphs terminate.
pub struct ObjectComparator;

impl Comparator for ObjectComparator {
    fn name(&self) -> &str {
        "object"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::Object(_), Value::Object(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        compare_objects(expected, actual, ctx, |_| true)
    }
}

/// Compare two object values, keeping only the properties `keep` selects.
pub(crate) fn compare_objects(
    expected: &Value,
    actual: &Value,
    ctx: &mut Comparison<'_>,
    keep: fn(&str) -> bool,
) -> Result<(), ComparatorError> {
    let (Value::Object(e), Value::Object(a)) = (expected, actual) else {
        return Err(ComparatorError::InvalidOperand(format!(
            "object comparison of {} and {}",
            expected.type_name(),
            actual.type_name()
        )));
    };

    let class = e.class();
    if a.class() != class {
        return Err(ComparatorError::failure(
            expected,
            actual,
            export(expected),
            export(actual),
            format!(
                "{} is not instance of expected class \"{class}\".",
                export(actual)
            ),
        ));
    }

    if ctx.visited().contains(e.addr(), a.addr()) {
        debug!(class = %class, "object pair already visited");
        return Ok(());
    }
    ctx.visited_mut().insert(e.addr(), a.addr());

    if e.ptr_eq(a) {
        return Ok(());
    }

    let expected_map = member_map(e, keep);
    let actual_map = member_map(a, keep);
    match compare_arrays(&expected_map, &actual_map, ctx) {
        Ok(()) => Ok(()),
        Err(err) => {
            let failure = err.into_failure()?;
            Err(ComparatorError::failure(
                expected,
                actual,
                relabel(failure.expected_as_string(), &class),
                relabel(failure.actual_as_string(), &a.class()),
                "Failed asserting that two objects are equal.",
            ))
        }
    }
}

fn member_map(object: &ObjectRef, keep: fn(&str) -> bool) -> Array {
    let mut map = to_array(&object.borrow());
    let dropped: Vec<_> = map
        .keys()
        .filter(|key| !keep(&key.to_string()))
        .cloned()
        .collect();
    for key in &dropped {
        map.remove(key);
    }
    map
}

/// `Array (...)` becomes `<Class> Object (...)`.
fn relabel(rendering: &str, class: &str) -> String {
    match rendering.strip_prefix("Array") {
        Some(rest) => format!("{class} Object{rest}"),
        None => rendering.to_string(),
    }
}
