use eqv_diff::remove_overlong_common_prefix_and_suffix;
use eqv_types::{export, loose_eq, to_display_string, Value};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Compares scalars and null, and strings against stringable objects.
///
/// When either side is a string (and the other is not a boolean) both are
/// converted to strings first, optionally lowercased. Two strings that still
/// differ fail with a diff of their renderings; everything else falls back
/// to loose equality and fails without a diff.
pub struct ScalarComparator;

fn is_scalar_or_null(value: &Value) -> bool {
    value.is_null() || value.is_scalar()
}

impl Comparator for ScalarComparator {
    fn name(&self) -> &str {
        "scalar"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        (is_scalar_or_null(expected) && is_scalar_or_null(actual))
            || (expected.is_string() && actual.is_stringable())
            || (expected.is_stringable() && actual.is_string())
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let coerce = (expected.is_string() && !actual.is_bool())
            || (actual.is_string() && !expected.is_bool());

        let (expected_cmp, actual_cmp) = if coerce {
            let mut e = to_display_string(expected);
            let mut a = to_display_string(actual);
            if ctx.options().ignore_case {
                e = e.to_lowercase();
                a = a.to_lowercase();
            }
            (Value::Str(e), Value::Str(a))
        } else {
            (expected.clone(), actual.clone())
        };

        if let (Value::Str(e), Value::Str(a)) = (expected, actual) {
            if expected_cmp.as_str() != actual_cmp.as_str() {
                let (e, a) = remove_overlong_common_prefix_and_suffix(e, a);
                return Err(ComparatorError::failure(
                    expected,
                    actual,
                    export(&Value::Str(e)),
                    export(&Value::Str(a)),
                    "Failed asserting that two strings are equal.",
                ));
            }
        }

        if !loose_eq(&expected_cmp, &actual_cmp) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ComparisonOptions;
    use crate::registry::compare_with;
    use eqv_types::{Object, Resource};

    fn stringable() -> Value {
        Value::from(
            Object::new("ClassWithToString")
                .with_display("string representation")
                .into_ref(),
        )
    }

    fn run(expected: Value, actual: Value, ignore_case: bool) -> Result<(), String> {
        let mut options = ComparisonOptions::default();
        options.ignore_case = ignore_case;
        match compare_with(&ScalarComparator, &expected, &actual, &options).unwrap() {
            crate::ComparisonResult::Equal => Ok(()),
            crate::ComparisonResult::NotEqual(failure) => Err(failure.to_string()),
        }
    }

    #[test]
    fn acceptance() {
        let accepted = [
            (Value::from("string"), Value::from("string")),
            (stringable(), Value::from("string")),
            (Value::from("string"), stringable()),
            (Value::from("string"), Value::Null),
            (Value::Bool(false), Value::from("string")),
            (Value::Null, Value::Null),
            (Value::from("10"), Value::from(10)),
            (Value::from(0.1), Value::from("0.1")),
        ];
        for (e, a) in &accepted {
            assert!(ScalarComparator.accepts(e, a), "{e:?} / {a:?}");
        }

        let rejected = [
            (Value::list([1]), Value::list([1])),
            (Value::from("string"), Value::list([1])),
            (stringable(), stringable()),
            (Value::Bool(false), stringable()),
            (Value::from(Resource::opaque("stream")), Value::from(Resource::opaque("stream"))),
        ];
        for (e, a) in &rejected {
            assert!(!ScalarComparator.accepts(e, a), "{e:?} / {a:?}");
        }
    }

    #[test]
    fn equal_pairs() {
        let cases: Vec<(Value, Value, bool)> = vec![
            (Value::from("string"), Value::from("string"), false),
            (stringable(), stringable(), false),
            (Value::from("string representation"), stringable(), false),
            (Value::from("string"), Value::from("STRING"), true),
            (Value::from("String Representation"), stringable(), true),
            (Value::from("10"), Value::from(10), false),
            (Value::from(""), Value::Bool(false), false),
            (Value::from("1"), Value::Bool(true), false),
            (Value::from("true"), Value::Bool(true), false),
            (Value::from(1), Value::Bool(true), false),
            (Value::from(0), Value::Bool(false), false),
            (Value::from("0"), Value::Bool(false), false),
            (Value::from(0.1), Value::from("0.1"), false),
            (Value::Bool(false), Value::Null, false),
            (Value::Null, Value::Null, false),
        ];
        for (e, a, ignore_case) in cases {
            assert_eq!(run(e.clone(), a.clone(), ignore_case), Ok(()), "{e:?} / {a:?}");
        }
    }

    #[test]
    fn unequal_pairs() {
        let strings = "Failed asserting that two strings are equal.";
        let other = "matches expected";
        let cases: Vec<(Value, Value, &str)> = vec![
            (Value::from("string"), Value::from("other string"), strings),
            (Value::from("string"), Value::from("STRING"), strings),
            (Value::from("9E6666666"), Value::from("9E7777777"), strings),
            (Value::from("0"), Value::from("0.0"), strings),
            (Value::from("0e1"), Value::from("0e2"), strings),
            (stringable(), Value::from("does not match"), other),
            (Value::from(0), Value::from("Foobar"), other),
            (Value::from("10"), Value::from(25), other),
            (Value::from("1"), Value::Bool(false), other),
            (Value::from("false"), Value::Bool(false), other),
            (Value::Bool(false), Value::Bool(true), other),
            (Value::Null, Value::Bool(true), other),
            (Value::from(0), Value::Bool(true), other),
        ];
        for (e, a, message) in cases {
            let err = run(e.clone(), a.clone(), false).unwrap_err();
            assert!(err.contains(message), "{e:?} / {a:?}: {err}");
        }
    }

    #[test]
    fn loose_mismatch_message() {
        let err = run(Value::from("10"), Value::from(25), false).unwrap_err();
        assert_eq!(err, "Failed asserting that 25 matches expected '10'.");
    }

    #[test]
    fn string_diffs_elide_long_common_parts() {
        let tail = " some llooooooooonnng llooooooooonnng llooooooooonnng llooooooooonnng trailer";
        let cases = [
            (
                "string".to_string(),
                "other string".to_string(),
                "-'string'\n+'other string'\n",
            ),
            (
                "too too too long string which will be cut HERE some trailer".to_string(),
                "too too too long string which will be cut XYZ some trailer".to_string(),
                "-'...ch will be cut HERE some trailer'\n+'...ch will be cut XYZ some trailer'\n",
            ),
            (
                format!("short start until HERE{tail}"),
                format!("short start until XYZ{tail}"),
                "-'short start until HERE some llooooooo...'\n+'short start until XYZ some llooooooo...'\n",
            ),
            (
                format!("too too too long string which will be cut HERE{tail}"),
                format!("too too too long string which will be cut XYZ{tail}"),
                "-'...ch will be cut HERE some llooooooo...'\n+'...ch will be cut XYZ some llooooooo...'\n",
            ),
        ];
        for (e, a, body) in cases {
            let result = compare_with(
                &ScalarComparator,
                &Value::from(e),
                &Value::from(a),
                &ComparisonOptions::default(),
            )
            .unwrap();
            let failure = result.failure().unwrap();
            assert_eq!(
                failure.diff(),
                format!("--- Expected\n+++ Actual\n@@ @@\n{body}")
            );
        }
    }
}
