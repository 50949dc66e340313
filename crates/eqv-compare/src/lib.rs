//! Value-equality comparison engine for eqv.
//!
//! Two values are compared by resolving a [`Comparator`] for the pair from a
//! [`Registry`] and running it. Composite comparators (arrays, objects)
//! resolve a comparator for every member pair through the same registry,
//! sharing one set of [`ComparisonOptions`] and one [`VisitedSet`] per
//! top-level call.
//!
//! A mismatch is an ordinary outcome, reported as a [`ComparisonFailure`]
//! carrying both values, a rendering of each, a message and a line diff.
//! Every other [`ComparatorError`] is a setup defect.
//!
//! # Key Types
//!
//! - [`Registry`] -- Ordered comparator set; custom comparators ahead of the defaults
//! - [`Comparator`] / [`Comparison`] -- Strategy trait and per-call context
//! - [`ComparisonOptions`] -- Delta, canonicalize, ignore-case
//! - [`ComparisonResult`] / [`ComparisonFailure`] -- Outcome of a comparison
//! - [`ComparatorError`] -- Failures and setup defects

pub mod comparator;
pub mod comparators;
pub mod error;
pub mod failure;
pub mod options;
pub mod registry;
pub mod tolerance;
pub mod visited;

pub use comparator::{Comparator, Comparison};
pub use comparators::{
    default_comparators, ArrayComparator, ClosureComparator, DateTimeComparator, DecimalComparator,
    DomNodeComparator, EnumerationComparator, ExceptionComparator, MockObjectComparator,
    NumericComparator, ObjectComparator, ObjectStorageComparator, ResourceComparator,
    ScalarComparator, TypeComparator,
};
pub use error::ComparatorError;
pub use failure::{ComparisonFailure, ComparisonResult};
pub use options::ComparisonOptions;
pub use registry::{compare_with, Registry};
pub use visited::VisitedSet;

use eqv_types::Value;

/// Assert equality against the process-wide registry.
pub fn assert_equals(
    expected: &Value,
    actual: &Value,
    options: &ComparisonOptions,
) -> Result<(), ComparatorError> {
    let registry = Registry::global()
        .read()
        .map_err(|e| ComparatorError::RegistryUnavailable(format!("lock poisoned: {e}")))?;
    registry.assert_equals(expected, actual, options)
}

/// Compare against the process-wide registry.
pub fn compare(
    expected: &Value,
    actual: &Value,
    options: &ComparisonOptions,
) -> Result<ComparisonResult, ComparatorError> {
    let registry = Registry::global()
        .read()
        .map_err(|e| ComparatorError::RegistryUnavailable(format!("lock poisoned: {e}")))?;
    registry.compare(expected, actual, options)
}
