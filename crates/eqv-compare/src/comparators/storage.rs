use eqv_types::{export, ObjectRef, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Compares object storages by the identity of their attached objects.
pub struct ObjectStorageComparator;

fn storage(value: &Value) -> Option<&ObjectRef> {
    value.as_object().filter(|o| o.borrow().is_storage())
}

/// Every object attached to `inner` is also attached to `outer`.
fn contained_in(inner: &ObjectRef, outer: &ObjectRef) -> bool {
    let outer = outer.borrow();
    let attached = outer.attached();
    inner
        .borrow()
        .attached()
        .iter()
        .all(|object| attached.iter().any(|other| other.ptr_eq(object)))
}

impl Comparator for ObjectStorageComparator {
    fn name(&self) -> &str {
        "object-storage"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        storage(expected).is_some() && storage(actual).is_some()
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        _ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Some(e), Some(a)) = (storage(expected), storage(actual)) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "storage comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        if e.ptr_eq(a) || (contained_in(e, a) && contained_in(a, e)) {
            return Ok(());
        }
        Err(ComparatorError::failure(
            expected,
            actual,
            export(expected),
            export(actual),
            "Failed asserting that two objects are equal.",
        ))
    }
}
