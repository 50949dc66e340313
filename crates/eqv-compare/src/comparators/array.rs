use std::borrow::Cow;

use eqv_types::{export_key, shortened_export, Array, Value};
use tracing::trace;

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Compares arrays member by member.
///
/// Keys are matched regardless of order. Member failures are collected
/// into one `Array (...)` rendering per side instead of stopping at the
/// first mismatch.
pub struct ArrayComparator;

impl Comparator for ArrayComparator {
    fn name(&self) -> &str {
        "array"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::Array(_), Value::Array(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        match (expected, actual) {
            (Value::Array(e), Value::Array(a)) => compare_arrays(e, a, ctx),
            _ => Err(ComparatorError::InvalidOperand(format!(
                "array comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            ))),
        }
    }
}

/// Indent a nested rendering by one level.
fn indent(rendering: &str) -> String {
    rendering.replace('\n', "\n    ").trim().to_string()
}

fn push_entry(buffer: &mut String, key: &str, rendering: &str) {
    buffer.push_str("    ");
    buffer.push_str(key);
    buffer.push_str(" => ");
    buffer.push_str(rendering);
    buffer.push('\n');
}

/// Compare two arrays, honouring `canonicalize`. Shared with the object
/// comparators, which compare property maps this way.
pub(crate) fn compare_arrays(
    expected: &Array,
    actual: &Array,
    ctx: &mut Comparison<'_>,
) -> Result<(), ComparatorError> {
    let (expected, actual) = if ctx.options().canonicalize {
        (
            Cow::Owned(expected.sorted_values()),
            Cow::Owned(actual.sorted_values()),
        )
    } else {
        (Cow::Borrowed(expected), Cow::Borrowed(actual))
    };

    let mut expected_buf = String::from("Array (\n");
    let mut actual_buf = String::from("Array (\n");
    let mut equal = true;

    for (key, value) in expected.iter() {
        let key_text = export_key(key);
        let Some(other) = actual.get(key) else {
            push_entry(&mut expected_buf, &key_text, &shortened_export(value));
            equal = false;
            continue;
        };

        trace!(key = %key_text, "comparing array member");
        match ctx.compare_nested(value, other) {
            Ok(()) => {
                push_entry(&mut expected_buf, &key_text, &shortened_export(value));
                push_entry(&mut actual_buf, &key_text, &shortened_export(other));
            }
            Err(err) => {
                let failure = err.into_failure()?;
                let expected_text = match failure.expected_as_string() {
                    "" => shortened_export(failure.expected()),
                    rendering => indent(rendering),
                };
                let actual_text = match failure.actual_as_string() {
                    "" => shortened_export(failure.actual()),
                    rendering => indent(rendering),
                };
                push_entry(&mut expected_buf, &key_text, &expected_text);
                push_entry(&mut actual_buf, &key_text, &actual_text);
                equal = false;
            }
        }
    }

    for (key, value) in actual.iter().filter(|(k, _)| !expected.contains_key(k)) {
        push_entry(&mut actual_buf, &export_key(key), &shortened_export(value));
        equal = false;
    }

    expected_buf.push(')');
    actual_buf.push(')');

    if equal {
        return Ok(());
    }
    Err(ComparatorError::failure(
        &Value::Array(expected.into_owned()),
        &Value::Array(actual.into_owned()),
        expected_buf,
        actual_buf,
        "Failed asserting that two arrays are equal.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ComparisonOptions;
    use crate::registry::compare_with;
    use crate::ComparisonResult;
    use eqv_types::Object;

    fn array<const N: usize>(entries: [(&str, Value); N]) -> Value {
        Value::Array(entries.into_iter().collect())
    }

    fn run(expected: Value, actual: Value, options: ComparisonOptions) -> ComparisonResult {
        compare_with(&ArrayComparator, &expected, &actual, &options).unwrap()
    }

    fn point(x: f64) -> Value {
        Value::from(Object::new("Struct").with_property("var", x).into_ref())
    }

    #[test]
    fn acceptance() {
        assert!(ArrayComparator.accepts(&Value::list([1]), &Value::list([2])));
        assert!(!ArrayComparator.accepts(&Value::list([1]), &Value::Null));
        assert!(!ArrayComparator.accepts(&Value::Null, &Value::list([1])));
        assert!(!ArrayComparator.accepts(&Value::Null, &Value::Null));
    }

    #[test]
    fn equal_arrays() {
        let delta = |d| ComparisonOptions::default().with_delta(d);
        let cases: Vec<(Value, Value, ComparisonOptions)> = vec![
            (
                array([("a", Value::from(1)), ("b", Value::from(2))]),
                array([("b", Value::from(2)), ("a", Value::from(1))]),
                delta(0.0),
            ),
            (Value::list([1]), Value::list(["1"]), delta(0.0)),
            (
                Value::list([3, 2, 1]),
                Value::list([2, 3, 1]),
                ComparisonOptions::default().canonicalized(),
            ),
            (Value::list([2.3]), Value::list([2.5]), delta(0.5)),
            (
                Value::list([Value::list([2.3])]),
                Value::list([Value::list([2.5])]),
                delta(0.5),
            ),
            (Value::list([point(2.3)]), Value::list([point(2.5)]), delta(0.5)),
            (Value::list(["true"]), Value::list([true]), delta(0.0)),
        ];
        for (e, a, options) in cases {
            assert!(run(e.clone(), a.clone(), options).is_equal(), "{e:?} / {a:?}");
        }
    }

    #[test]
    fn unequal_arrays() {
        let delta = |d| ComparisonOptions::default().with_delta(d);
        let cases: Vec<(Value, Value, ComparisonOptions)> = vec![
            (Value::list(Vec::<Value>::new()), Value::list([1]), delta(0.0)),
            (Value::list([1]), Value::list(Vec::<Value>::new()), delta(0.0)),
            (Value::list([Value::Null]), Value::list(Vec::<Value>::new()), delta(0.0)),
            (Value::list([1, 2]), Value::list([1, 3]), delta(0.0)),
            (
                array([("0", Value::from("a")), ("b", Value::list([1, 2]))]),
                array([("0", Value::from("a")), ("b", Value::list([2, 1]))]),
                delta(0.0),
            ),
            (Value::list([2.3]), Value::list([4.2]), delta(0.5)),
            (
                Value::list([Value::list([2.3])]),
                Value::list([Value::list([4.2])]),
                delta(0.5),
            ),
            (Value::list([point(2.3)]), Value::list([point(4.2)]), delta(0.5)),
            (Value::list(["false"]), Value::list([false]), delta(0.0)),
            (Value::list([3, 2, 1]), Value::list([2, 3, 1]), delta(0.0)),
        ];
        for (e, a, options) in cases {
            let result = run(e.clone(), a.clone(), options);
            let failure = result.failure().expect("arrays should differ");
            assert_eq!(failure.message(), "Failed asserting that two arrays are equal.");
        }
    }

    #[test]
    fn buffers_list_every_member() {
        let result = run(
            array([("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]),
            array([("a", Value::from(1)), ("b", Value::from(5)), ("d", Value::from(4))]),
            ComparisonOptions::default(),
        );
        let failure = result.failure().unwrap();
        assert_eq!(
            failure.expected_as_string(),
            "Array (\n    'a' => 1\n    'b' => 2\n    'c' => 3\n)"
        );
        assert_eq!(
            failure.actual_as_string(),
            "Array (\n    'a' => 1\n    'b' => 5\n    'd' => 4\n)"
        );
        assert_eq!(
            failure.diff(),
            "--- Expected\n+++ Actual\n@@ @@\n Array (\n     'a' => 1\n-    'b' => 2\n-    'c' => 3\n+    'b' => 5\n+    'd' => 4\n )\n"
        );
    }

    #[test]
    fn nested_failures_are_indented() {
        let result = run(
            array([("n", Value::list([1, 2]))]),
            array([("n", Value::list([1, 3]))]),
            ComparisonOptions::default(),
        );
        let failure = result.failure().unwrap();
        assert_eq!(
            failure.expected_as_string(),
            "Array (\n    'n' => Array (\n        0 => 1\n        1 => 2\n    )\n)"
        );
    }

    #[test]
    fn nested_string_failures_use_their_rendering() {
        let result = run(
            Value::list(["string"]),
            Value::list(["other string"]),
            ComparisonOptions::default(),
        );
        let failure = result.failure().unwrap();
        assert_eq!(failure.expected_as_string(), "Array (\n    0 => 'string'\n)");
        assert_eq!(failure.actual_as_string(), "Array (\n    0 => 'other string'\n)");
    }

    #[test]
    fn canonicalize_orders_mixed_strings_consistently() {
        let items = ["10", "9", "1a", "b", "0.5", "x", "2", "1b", "30", "3a"];
        let mut reversed = items;
        reversed.reverse();
        let result = run(
            Value::list(items),
            Value::list(reversed),
            ComparisonOptions::default().canonicalized(),
        );
        assert!(result.is_equal(), "{:?}", result.failure());
    }

    #[test]
    fn large_lists_compare_by_key() {
        let expected = Value::list(0..20_000);
        let actual = Value::list((0..20_000).map(|i| i.to_string()));
        assert!(run(expected, actual, ComparisonOptions::default()).is_equal());
    }

    #[test]
    fn nested_errors_propagate_unchanged() {
        let dt = |s| Value::datetime(s).unwrap();
        let err = compare_with(
            &ArrayComparator,
            &Value::list([dt("2013-03-29T04:13:35Z")]),
            &Value::list([dt("2013-03-29T04:13:36Z")]),
            &ComparisonOptions::default().with_delta(f64::INFINITY),
        )
        .unwrap_err();
        assert!(matches!(err, ComparatorError::InvalidOperand(_)), "{err:?}");
    }
}
