use eqv_types::{export, Resource, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Stream modes whose content can be read back for comparison.
const READABLE_MODES: [&str; 5] = ["a+", "c+", "r", "w+", "x+"];

/// Compares resources by handle, or by content for readable streams.
pub struct ResourceComparator;

/// What a resource compares as: a content digest for readable streams,
/// otherwise its handle.
fn comparison_key(resource: &Resource) -> String {
    match resource.stream_data() {
        Some(stream) if READABLE_MODES.iter().any(|m| stream.mode().contains(m)) => {
            hex::encode(blake3::hash(stream.content()).as_bytes())
        }
        _ => format!("Resource id #{}", resource.id()),
    }
}

impl Comparator for ResourceComparator {
    fn name(&self) -> &str {
        "resource"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::Resource(_), Value::Resource(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        _ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Value::Resource(e), Value::Resource(a)) = (expected, actual) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "resource comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        if e.ptr_eq(a) || comparison_key(e) == comparison_key(a) {
            return Ok(());
        }
        Err(ComparatorError::failure(
            expected,
            actual,
            export(expected),
            export(actual),
            "Failed asserting that two resources are equal.",
        ))
    }
}
