//! Foundation types for eqv.
//!
//! This crate provides the dynamic value model that the comparison engine
//! operates on, together with the loose coercion rules scalar comparison is
//! defined in terms of and the exporter that renders values for failure
//! messages. Every other eqv crate depends on `eqv-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- A dynamically typed runtime value
//! - [`Array`] / [`ArrayKey`] -- Ordered key→value mapping with int/string keys
//! - [`ObjectRef`] -- Identity-carrying, shareable object handle (cycles allowed)
//! - [`EnumCase`] -- Member of a closed enumerated type
//! - [`ResourceRef`] / [`ClosureRef`] -- Opaque identity-carrying handles
//! - [`XmlNode`] -- Document / element tree with a canonical text form
//! - [`Number`] -- Parsed numeric operand (integer or float)

pub mod coerce;
pub mod error;
pub mod export;
pub mod json;
pub mod value;
pub mod xml;

pub use coerce::{
    float_to_string, is_numeric, loose_cmp, loose_eq, parse_numeric, to_bool, to_display_string,
    Number,
};
pub use error::TypeError;
pub use export::{export, export_key, shortened_export, to_array};
pub use json::from_json;
pub use value::{
    Array, ArrayKey, Closure, ClosureRef, EnumBacking, EnumCase, Object, ObjectKind, ObjectRef,
    Resource, ResourceRef, Stream, Value, MOCK_PROPERTY_PREFIX,
};
pub use xml::XmlNode;
