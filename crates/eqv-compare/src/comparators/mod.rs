//! Built-in comparators.

use std::sync::Arc;

use crate::comparator::Comparator;

pub mod array;
pub mod closure;
pub mod datetime;
pub mod decimal;
pub mod dom;
pub mod enumeration;
pub mod exception;
pub mod mock_object;
pub mod numeric;
pub mod object;
pub mod resource;
pub mod scalar;
pub mod storage;
pub mod type_mismatch;

pub use array::ArrayComparator;
pub use closure::ClosureComparator;
pub use datetime::DateTimeComparator;
pub use decimal::DecimalComparator;
pub use dom::DomNodeComparator;
pub use enumeration::EnumerationComparator;
pub use exception::ExceptionComparator;
pub use mock_object::MockObjectComparator;
pub use numeric::NumericComparator;
pub use object::ObjectComparator;
pub use resource::ResourceComparator;
pub use scalar::ScalarComparator;
pub use storage::ObjectStorageComparator;
pub use type_mismatch::TypeComparator;

/// The default comparators in resolution order. The type comparator comes
/// last and accepts every pair.
pub fn default_comparators() -> Vec<Arc<dyn Comparator>> {
    vec![
        Arc::new(ClosureComparator),
        Arc::new(MockObjectComparator),
        Arc::new(DateTimeComparator),
        Arc::new(DomNodeComparator),
        Arc::new(ObjectStorageComparator),
        Arc::new(ExceptionComparator),
        Arc::new(EnumerationComparator),
        Arc::new(DecimalComparator),
        Arc::new(ObjectComparator),
        Arc::new(ResourceComparator),
        Arc::new(ArrayComparator),
        Arc::new(NumericComparator),
        Arc::new(ScalarComparator),
        Arc::new(TypeComparator),
    ]
}
