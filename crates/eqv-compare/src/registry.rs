use std::sync::{Arc, OnceLock, RwLock};

use eqv_types::Value;
use tracing::debug;

use crate::comparator::{Comparator, Comparison};
use crate::comparators::default_comparators;
use crate::error::ComparatorError;
use crate::failure::ComparisonResult;
use crate::options::ComparisonOptions;

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

/// An ordered set of comparators.
///
/// Resolution scans the custom comparators (most recently registered
/// first), then the defaults in their fixed priority order, and returns the
/// first one that accepts the pair.
pub struct Registry {
    custom: Vec<Arc<dyn Comparator>>,
    defaults: Vec<Arc<dyn Comparator>>,
}

impl Registry {
    /// A registry holding the default comparators and no custom ones.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for comparator in default_comparators() {
            registry.add_default(comparator);
        }
        registry
    }

    /// A registry with no comparators at all.
    pub fn empty() -> Self {
        Self {
            custom: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// The process-wide registry, built with the defaults on first access.
    pub fn global() -> &'static RwLock<Registry> {
        GLOBAL.get_or_init(|| RwLock::new(Registry::new()))
    }

    /// Append a comparator to the end of the default list.
    pub fn add_default(&mut self, comparator: Arc<dyn Comparator>) {
        self.defaults.push(comparator);
    }

    /// Register a custom comparator ahead of every other comparator.
    pub fn register(&mut self, comparator: Arc<dyn Comparator>) {
        debug!(comparator = comparator.name(), "registering comparator");
        self.custom.insert(0, comparator);
    }

    /// Remove the first custom entry that is the same instance as
    /// `comparator`. Returns whether one was removed.
    pub fn unregister(&mut self, comparator: &Arc<dyn Comparator>) -> bool {
        let target = Arc::as_ptr(comparator) as *const ();
        match self
            .custom
            .iter()
            .position(|c| Arc::as_ptr(c) as *const () == target)
        {
            Some(index) => {
                self.custom.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every custom comparator. Defaults are untouched.
    pub fn reset(&mut self) {
        self.custom.clear();
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    /// Comparator names in resolution order.
    pub fn names(&self) -> Vec<&str> {
        self.custom
            .iter()
            .chain(&self.defaults)
            .map(|c| c.name())
            .collect()
    }

    /// The first comparator that accepts the pair.
    pub fn comparator_for(
        &self,
        expected: &Value,
        actual: &Value,
    ) -> Result<&dyn Comparator, ComparatorError> {
        let comparator = self
            .custom
            .iter()
            .chain(&self.defaults)
            .find(|c| c.accepts(expected, actual))
            .ok_or_else(|| ComparatorError::NoComparatorFound {
                expected: expected.type_name().to_string(),
                actual: actual.type_name().to_string(),
            })?;
        debug!(
            comparator = comparator.name(),
            expected = expected.type_name(),
            actual = actual.type_name(),
            "resolved comparator"
        );
        Ok(comparator.as_ref())
    }

    /// Compare two values, returning [`ComparatorError::Failure`] when they differ.
    pub fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        options: &ComparisonOptions,
    ) -> Result<(), ComparatorError> {
        options.validate()?;
        let mut ctx = Comparison::new(self, *options);
        let result = ctx.compare_nested(expected, actual);
        debug!(
            equal = result.is_ok(),
            visited = ctx.visited().len(),
            "comparison finished"
        );
        result
    }

    /// Compare two values. Failures become [`ComparisonResult::NotEqual`];
    /// every other error is returned as-is.
    pub fn compare(
        &self,
        expected: &Value,
        actual: &Value,
        options: &ComparisonOptions,
    ) -> Result<ComparisonResult, ComparatorError> {
        into_result(self.assert_equals(expected, actual, options))
    }

    /// Run one specific comparator on the pair, resolving nested members
    /// against this registry.
    pub fn compare_with(
        &self,
        comparator: &dyn Comparator,
        expected: &Value,
        actual: &Value,
        options: &ComparisonOptions,
    ) -> Result<ComparisonResult, ComparatorError> {
        options.validate()?;
        let mut ctx = Comparison::new(self, *options);
        into_result(comparator.assert_equals(expected, actual, &mut ctx))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one specific comparator against a registry holding the defaults.
pub fn compare_with(
    comparator: &dyn Comparator,
    expected: &Value,
    actual: &Value,
    options: &ComparisonOptions,
) -> Result<ComparisonResult, ComparatorError> {
    Registry::new().compare_with(comparator, expected, actual, options)
}

fn into_result(outcome: Result<(), ComparatorError>) -> Result<ComparisonResult, ComparatorError> {
    match outcome {
        Ok(()) => Ok(ComparisonResult::Equal),
        Err(err) => err.into_failure().map(ComparisonResult::NotEqual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::{ScalarComparator, TypeComparator};

    /// Accepts everything and always succeeds.
    struct AlwaysEqual;

    impl Comparator for AlwaysEqual {
        fn name(&self) -> &str {
            "always-equal"
        }

        fn accepts(&self, _: &Value, _: &Value) -> bool {
            true
        }

        fn assert_equals(&self, _: &Value, _: &Value, _: &mut Comparison<'_>) -> Result<(), ComparatorError> {
            Ok(())
        }
    }

    #[test]
    fn default_order() {
        assert_eq!(
            Registry::new().names(),
            vec![
                "closure",
                "mock-object",
                "datetime",
                "dom-node",
                "object-storage",
                "exception",
                "enumeration",
                "decimal",
                "object",
                "resource",
                "array",
                "numeric",
                "scalar",
                "type",
            ]
        );
    }

    #[test]
    fn resolution_picks_first_accepting_default() {
        let registry = Registry::new();
        let pick = |e: Value, a: Value| registry.comparator_for(&e, &a).unwrap().name().to_string();
        assert_eq!(pick(Value::from(1), Value::from(2.0)), "numeric");
        assert_eq!(pick(Value::from("a"), Value::from("b")), "scalar");
        assert_eq!(pick(Value::list([1]), Value::list([1])), "array");
        assert_eq!(pick(Value::list([1]), Value::from(1)), "type");
    }

    #[test]
    fn custom_comparators_win_most_recent_first() {
        let mut registry = Registry::new();
        let first: Arc<dyn Comparator> = Arc::new(AlwaysEqual);
        let second: Arc<dyn Comparator> = Arc::new(ScalarComparator);
        registry.register(first.clone());
        registry.register(second.clone());
        assert_eq!(registry.custom_count(), 2);
        assert_eq!(registry.names()[0], "scalar");

        let picked = registry
            .comparator_for(&Value::list([1]), &Value::from(1))
            .unwrap();
        assert_eq!(picked.name(), "always-equal");

        assert!(registry.unregister(&first));
        assert!(!registry.unregister(&first));
        assert_eq!(registry.custom_count(), 1);

        registry.reset();
        assert_eq!(registry.custom_count(), 0);
        assert_eq!(registry.names().len(), 14);
    }

    #[test]
    fn unregister_is_by_identity() {
        let mut registry = Registry::new();
        let registered: Arc<dyn Comparator> = Arc::new(TypeComparator);
        let lookalike: Arc<dyn Comparator> = Arc::new(TypeComparator);
        registry.register(registered.clone());
        assert!(!registry.unregister(&lookalike));
        assert!(registry.unregister(&registered));
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = Registry::empty();
        let err = registry
            .compare(&Value::from(1), &Value::from(1), &ComparisonOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ComparatorError::NoComparatorFound { ref expected, ref actual }
                if expected == "integer" && actual == "integer"
        ));
    }

    #[test]
    fn invalid_options_are_rejected_before_comparing() {
        let err = Registry::new()
            .compare(
                &Value::from(1),
                &Value::from(1),
                &ComparisonOptions::default().with_delta(f64::NAN),
            )
            .unwrap_err();
        assert!(matches!(err, ComparatorError::Config(_)));
    }

    #[test]
    fn compare_with_runs_the_given_comparator() {
        let result = compare_with(
            &TypeComparator,
            &Value::from(1),
            &Value::from(1),
            &ComparisonOptions::default(),
        )
        .unwrap();
        assert!(!result.is_equal());
    }

    #[test]
    fn global_registry_is_shared() {
        let registry = Registry::global().read().unwrap();
        assert_eq!(registry.names().last(), Some(&"type"));
    }
}
