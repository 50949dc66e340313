use eqv_types::Value;
use tracing::trace;

use crate::error::ComparatorError;
use crate::options::ComparisonOptions;
use crate::registry::Registry;
use crate::visited::VisitedSet;

// ---------------------------------------------------------------------------
// Comparator trait
// ---------------------------------------------------------------------------

/// A comparison strategy for one shape of value pair.
///
/// Comparators hold no per-call state: everything a call needs travels in
/// the [`Comparison`] context. The trait is object-safe and `Send + Sync` so
/// comparators can be shared as `Arc<dyn Comparator>`.
pub trait Comparator: Send + Sync {
    /// Human-readable name (e.g., "scalar", "array").
    fn name(&self) -> &str;

    /// Whether this comparator handles the pair.
    fn accepts(&self, expected: &Value, actual: &Value) -> bool;

    /// Compare the pair, returning [`ComparatorError::Failure`] when they
    /// differ. Only called on pairs the comparator accepts.
    fn assert_equals(
        &self,
        expected: &Value,
        actual: &Value,
        ctx: &mut Comparison<'_>,
    ) -> Result<(), ComparatorError>;
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Context of one top-level comparison: the registry nested members are
/// resolved against, the options, and the visited identity pairs.
pub struct Comparison<'r> {
    registry: &'r Registry,
    options: ComparisonOptions,
    visited: VisitedSet,
    depth: usize,
}

impl<'r> Comparison<'r> {
    pub fn new(registry: &'r Registry, options: ComparisonOptions) -> Self {
        Self {
            registry,
            options,
            visited: VisitedSet::new(),
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn visited_mut(&mut self) -> &mut VisitedSet {
        &mut self.visited
    }

    /// Nesting depth of the comparison currently running (0 at the top).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve a comparator for a nested pair and run it with the same
    /// options and visited set.
    pub fn compare_nested(&mut self, expected: &Value, actual: &Value) -> Result<(), ComparatorError> {
        let registry = self.registry;
        let comparator = registry.comparator_for(expected, actual)?;
        trace!(
            comparator = comparator.name(),
            depth = self.depth,
            "comparing nested values"
        );
        self.depth += 1;
        let result = comparator.assert_equals(expected, actual, self);
        self.depth -= 1;
        result
    }
}
