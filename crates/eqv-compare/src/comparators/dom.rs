use eqv_types::{Value, XmlNode};

use crate::comparator::{Comparator, Comparison};
use crate::error::ComparatorError;

/// Compares markup trees by their canonical text.
pub struct DomNodeComparator;

fn node_to_text(node: &XmlNode, ignore_case: bool) -> String {
    let text = node.canonical_text();
    if ignore_case {
        text.to_lowercase()
    } else {
        text
    }
}

impl Comparator for DomNodeComparator {
    fn name(&self) -> &str {
        "dom-node"
    }

    fn accepts(&self, expected: &Value, actual: &Value) -> bool {
        matches!((expected, actual), (Value::Xml(_), Value::Xml(_)))
    }

    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError> {
        let (Value::Xml(e), Value::Xml(a)) = (expected, actual) else {
            return Err(ComparatorError::InvalidOperand(format!(
                "markup comparison of {} and {}",
                expected.type_name(),
                actual.type_name()
            )));
        };

        let ignore_case = ctx.options().ignore_case;
        let expected_text = node_to_text(e, ignore_case);
        let actual_text = node_to_text(a, ignore_case);
        if expected_text != actual_text {
            let kind = if e.is_document() { "documents" } else { "nodes" };
            return Err(ComparatorError::failure(
                expected,
                actual,
                expected_text,
                actual_text,
                format!("Failed asserting that two DOM {kind} are equal."),
            ));
        }
        Ok(())
    }
}
