//! The dynamic value model.
//!
//! [`Value`] is a sum type over every shape the comparison engine knows how
//! to compare. Scalars, arrays, decimals, date-times and enum cases have
//! value semantics; objects, resources and closures are handles with an
//! identity, so that two distinct handles can be told apart even when their
//! contents are equal, and so that object graphs may contain cycles.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};

use crate::coerce::loose_cmp;
use crate::error::TypeError;
use crate::xml::XmlNode;

/// Property names starting with this prefix are mock-framework bookkeeping
/// and are ignored when mock objects are compared.
pub const MOCK_PROPERTY_PREFIX: &str = "__mock";

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique handle number for objects, resources and closures.
fn next_handle() -> u64 {
    NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically typed runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Array),
    Object(ObjectRef),
    /// Arbitrary-precision decimal; the scale given at construction is kept.
    Decimal(BigDecimal),
    DateTime(DateTime<FixedOffset>),
    Enum(EnumCase),
    Resource(ResourceRef),
    Closure(ClosureRef),
    Xml(XmlNode),
}

impl Value {
    /// Build a decimal value from its textual form, keeping the scale.
    pub fn decimal(literal: &str) -> Result<Self, TypeError> {
        BigDecimal::from_str(literal.trim())
            .map(Value::Decimal)
            .map_err(|_| TypeError::InvalidDecimal(literal.to_string()))
    }

    /// Build a date-time value from an RFC 3339 timestamp.
    pub fn datetime(literal: &str) -> Result<Self, TypeError> {
        DateTime::parse_from_rfc3339(literal)
            .map(Value::DateTime)
            .map_err(|_| TypeError::InvalidDateTime(literal.to_string()))
    }

    /// Build a list (keys `0..n`) from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Array::list(items))
    }

    /// The conventional dynamic-language type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "double",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Resource(_) => "resource",
            Value::Object(_)
            | Value::Decimal(_)
            | Value::DateTime(_)
            | Value::Enum(_)
            | Value::Closure(_)
            | Value::Xml(_) => "object",
        }
    }

    /// Class name for object-like values, `None` for scalars, arrays and resources.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Value::Object(object) => Some(object.class()),
            Value::Decimal(_) => Some("Decimal".into()),
            Value::DateTime(_) => Some("DateTime".into()),
            Value::Enum(case) => Some(case.enum_type().to_string()),
            Value::Closure(_) => Some("Closure".into()),
            Value::Xml(node) if node.is_document() => Some("XmlDocument".into()),
            Value::Xml(_) => Some("XmlNode".into()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// `true` for booleans, integers, floats and strings.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    /// `true` when the value is an object that opted into string conversion.
    pub fn is_stringable(&self) -> bool {
        match self {
            Value::Object(object) => object.borrow().as_string().is_some(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<BigDecimal> for Value {
    fn from(decimal: BigDecimal) -> Self {
        Value::Decimal(decimal)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<EnumCase> for Value {
    fn from(case: EnumCase) -> Self {
        Value::Enum(case)
    }
}

impl From<ResourceRef> for Value {
    fn from(resource: ResourceRef) -> Self {
        Value::Resource(resource)
    }
}

impl From<ClosureRef> for Value {
    fn from(closure: ClosureRef) -> Self {
        Value::Closure(closure)
    }
}

impl From<XmlNode> for Value {
    fn from(node: XmlNode) -> Self {
        Value::Xml(node)
    }
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

/// Key of an [`Array`] entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    /// Normalize a string key: canonical decimal integers become `Int` keys.
    pub fn normalize(key: &str) -> Self {
        if is_canonical_integer(key) {
            if let Ok(i) = key.parse::<i64>() {
                return ArrayKey::Int(i);
            }
        }
        ArrayKey::Str(key.to_string())
    }
}

/// `"0"`, `"42"`, `"-7"`; not `"007"`, `"-0"`, `"+1"` or `" 1"`.
fn is_canonical_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return digits.len() == s.len();
    }
    !digits.starts_with('0')
}

impl From<i64> for ArrayKey {
    fn from(i: i64) -> Self {
        ArrayKey::Int(i)
    }
}

impl From<i32> for ArrayKey {
    fn from(i: i32) -> Self {
        ArrayKey::Int(i64::from(i))
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        ArrayKey::normalize(s)
    }
}

impl From<String> for ArrayKey {
    fn from(s: String) -> Self {
        ArrayKey::normalize(&s)
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{i}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

/// An ordered key→value mapping.
///
/// Insertion order is preserved; inserting an existing key replaces its
/// value in place. Lookups go through a key→position index.
#[derive(Clone, Debug, Default)]
pub struct Array {
    entries: Vec<(ArrayKey, Value)>,
    index: HashMap<ArrayKey, usize>,
    max_int: Option<i64>,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list with keys `0..n`.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut array = Self::new();
        for item in items {
            array.push(item);
        }
        array
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ArrayKey) -> Option<&Value> {
        self.index.get(key).map(|&at| &self.entries[at].1)
    }

    pub fn get_mut(&mut self, key: &ArrayKey) -> Option<&mut Value> {
        let at = *self.index.get(key)?;
        Some(&mut self.entries[at].1)
    }

    pub fn contains_key(&self, key: &ArrayKey) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<ArrayKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(&at) = self.index.get(&key) {
            self.entries[at].1 = value;
            return;
        }
        if let ArrayKey::Int(i) = key {
            self.max_int = Some(self.max_int.map_or(i, |max| max.max(i)));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Append a value under the next integer key (one past the largest
    /// integer key, or 0).
    pub fn push(&mut self, value: impl Into<Value>) {
        let next = self.max_int.map_or(0, |max| max.saturating_add(1));
        self.insert(ArrayKey::Int(next), value);
    }

    pub fn remove(&mut self, key: &ArrayKey) -> Option<Value> {
        let at = self.index.remove(key)?;
        let (_, value) = self.entries.remove(at);
        for slot in self.index.values_mut() {
            if *slot > at {
                *slot -= 1;
            }
        }
        if matches!(key, ArrayKey::Int(i) if Some(*i) == self.max_int) {
            self.max_int = self
                .entries
                .iter()
                .filter_map(|(k, _)| match k {
                    ArrayKey::Int(i) => Some(*i),
                    ArrayKey::Str(_) => None,
                })
                .max();
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArrayKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArrayKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// The values sorted by [`loose_cmp`] (stable), renumbered from 0.
    /// Key association is lost.
    pub fn sorted_values(&self) -> Array {
        let mut values: Vec<Value> = self.values().cloned().collect();
        values.sort_by(loose_cmp);
        Array::list(values)
    }
}

impl<K, V> FromIterator<(K, V)> for Array
where
    K: Into<ArrayKey>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut array = Array::new();
        for (k, v) in iter {
            array.insert(k, v);
        }
        array
    }
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// Structural flavour of an object; drives comparator selection.
#[derive(Clone, Debug, Default)]
pub enum ObjectKind {
    #[default]
    Plain,
    /// A thrown error value (message, code, file, line, trace, previous).
    Exception,
    /// A test double; properties prefixed with [`MOCK_PROPERTY_PREFIX`] are bookkeeping.
    MockObject,
    /// An identity set of attached objects.
    Storage(Vec<ObjectRef>),
}

/// Object state: class, handle number, kind, ordered properties.
#[derive(Clone, Debug)]
pub struct Object {
    class: String,
    id: u64,
    kind: ObjectKind,
    properties: Vec<(String, Value)>,
    display: Option<String>,
}

impl Object {
    /// A plain object of the given class with no properties.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            id: next_handle(),
            kind: ObjectKind::Plain,
            properties: Vec::new(),
            display: None,
        }
    }

    /// An exception object with the standard member layout.
    pub fn exception(class: impl Into<String>, message: impl Into<String>, code: i64) -> Self {
        let mut object = Self::new(class);
        object.kind = ObjectKind::Exception;
        object.set_property("message", Value::Str(message.into()));
        object.set_property("string", Value::Str(String::new()));
        object.set_property("code", Value::Int(code));
        object.set_property("file", Value::Str(String::new()));
        object.set_property("line", Value::Int(0));
        object.set_property("trace", Value::Array(Array::new()));
        object.set_property("previous", Value::Null);
        object
    }

    /// A mock object of the given class, carrying its invocation bookkeeping.
    pub fn mock(class: impl Into<String>) -> Self {
        let mut object = Self::new(class);
        object.kind = ObjectKind::MockObject;
        object.set_property(
            format!("{MOCK_PROPERTY_PREFIX}_invocations"),
            Value::Array(Array::new()),
        );
        object.set_property(format!("{MOCK_PROPERTY_PREFIX}_id"), Value::Int(object.id as i64));
        object
    }

    /// An empty object storage.
    pub fn storage() -> Self {
        let mut object = Self::new("ObjectStorage");
        object.kind = ObjectKind::Storage(Vec::new());
        object
    }

    /// Builder: set a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Builder: opt into string conversion with the given representation.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Builder: record where an exception was raised.
    pub fn with_location(mut self, file: impl Into<String>, line: i64) -> Self {
        self.set_property("file", Value::Str(file.into()));
        self.set_property("line", Value::Int(line));
        self
    }

    /// Wrap into a shareable handle.
    pub fn into_ref(self) -> ObjectRef {
        ObjectRef(Rc::new(RefCell::new(self)))
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn is_exception(&self) -> bool {
        matches!(self.kind, ObjectKind::Exception)
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.kind, ObjectKind::MockObject)
    }

    pub fn is_storage(&self) -> bool {
        matches!(self.kind, ObjectKind::Storage(_))
    }

    /// The string-conversion capability, if the object opted in.
    pub fn as_string(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.properties
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Attach an object to a storage. Attaching the same handle twice is a no-op.
    pub fn attach(&mut self, object: ObjectRef) -> Result<(), TypeError> {
        match &mut self.kind {
            ObjectKind::Storage(attached) => {
                if !attached.iter().any(|o| o.ptr_eq(&object)) {
                    attached.push(object);
                }
                Ok(())
            }
            _ => Err(TypeError::NotAStorage {
                class: self.class.clone(),
            }),
        }
    }

    /// Objects attached to a storage; empty for every other kind.
    pub fn attached(&self) -> &[ObjectRef] {
        match &self.kind {
            ObjectKind::Storage(attached) => attached,
            _ => &[],
        }
    }
}

/// Shared handle to an [`Object`].
///
/// Cloning the handle does not clone the object: both handles refer to the
/// same instance and compare identical under [`ObjectRef::ptr_eq`].
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// `true` when both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity of the instance for the lifetime of the handle.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn id(&self) -> u64 {
        self.0.borrow().id
    }

    pub fn class(&self) -> String {
        self.0.borrow().class.clone()
    }
}

impl fmt::Debug for ObjectRef {
    // Objects may be cyclic, so only the header is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => write!(f, "{} Object #{}", object.class, object.id),
            Err(_) => f.write_str("Object (borrowed)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Backing value of an enum case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumBacking {
    Int(i64),
    Str(String),
}

/// A member of a closed enumerated type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumCase {
    enum_type: String,
    case: String,
    backing: Option<EnumBacking>,
}

impl EnumCase {
    /// A pure (unbacked) case.
    pub fn new(enum_type: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            enum_type: enum_type.into(),
            case: case.into(),
            backing: None,
        }
    }

    /// A case backed by an integer or string value.
    pub fn backed(
        enum_type: impl Into<String>,
        case: impl Into<String>,
        backing: EnumBacking,
    ) -> Self {
        Self {
            enum_type: enum_type.into(),
            case: case.into(),
            backing: Some(backing),
        }
    }

    pub fn enum_type(&self) -> &str {
        &self.enum_type
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    pub fn backing(&self) -> Option<&EnumBacking> {
        self.backing.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Content of a stream resource.
#[derive(Clone, Debug)]
pub struct Stream {
    mode: String,
    content: Vec<u8>,
}

impl Stream {
    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// An external resource: a numeric handle, its type, and stream content if any.
#[derive(Debug)]
pub struct Resource {
    id: u64,
    kind: String,
    stream: Option<Stream>,
}

impl Resource {
    /// A stream resource opened with `mode` (e.g. `"r"`, `"w+"`) holding `content`.
    pub fn stream(mode: impl Into<String>, content: impl Into<Vec<u8>>) -> ResourceRef {
        ResourceRef(Rc::new(Self {
            id: next_handle(),
            kind: "stream".into(),
            stream: Some(Stream {
                mode: mode.into(),
                content: content.into(),
            }),
        }))
    }

    /// A non-stream resource of the given type.
    pub fn opaque(kind: impl Into<String>) -> ResourceRef {
        ResourceRef(Rc::new(Self {
            id: next_handle(),
            kind: kind.into(),
            stream: None,
        }))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn stream_data(&self) -> Option<&Stream> {
        self.stream.as_ref()
    }
}

/// Shared handle to a [`Resource`].
#[derive(Clone, Debug)]
pub struct ResourceRef(Rc<Resource>);

impl ResourceRef {
    pub fn ptr_eq(&self, other: &ResourceRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ResourceRef {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// A callable, known only by identity and declaration site.
#[derive(Debug)]
pub struct Closure {
    id: u64,
    file: String,
    line: u32,
}

impl Closure {
    pub fn new(file: impl Into<String>, line: u32) -> ClosureRef {
        ClosureRef(Rc::new(Self {
            id: next_handle(),
            file: file.into(),
            line,
        }))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Shared handle to a [`Closure`].
#[derive(Clone, Debug)]
pub struct ClosureRef(Rc<Closure>);

impl ClosureRef {
    pub fn ptr_eq(&self, other: &ClosureRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ClosureRef {
    type Target = Closure;

    fn deref(&self) -> &Closure {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_integer_string_keys_are_normalized() {
        assert_eq!(ArrayKey::from("7"), ArrayKey::Int(7));
        assert_eq!(ArrayKey::from("-3"), ArrayKey::Int(-3));
        assert_eq!(ArrayKey::from("0"), ArrayKey::Int(0));
        assert_eq!(ArrayKey::from("07"), ArrayKey::Str("07".into()));
        assert_eq!(ArrayKey::from("-0"), ArrayKey::Str("-0".into()));
        assert_eq!(ArrayKey::from("1.5"), ArrayKey::Str("1.5".into()));
        assert_eq!(ArrayKey::from("a"), ArrayKey::Str("a".into()));
    }

    #[test]
    fn push_uses_next_integer_key() {
        let mut array = Array::new();
        array.insert("name", "x");
        array.insert(5, 1);
        array.push(2);
        assert_eq!(array.keys().last(), Some(&ArrayKey::Int(6)));
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut array: Array = [("a", 1), ("b", 2)].into_iter().collect();
        array.insert("a", 3);
        let keys: Vec<String> = array.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(matches!(array.get(&"a".into()), Some(Value::Int(3))));
    }

    #[test]
    fn remove_keeps_lookups_consistent() {
        let mut array = Array::list(0..1000);
        assert!(matches!(array.remove(&ArrayKey::Int(10)), Some(Value::Int(10))));
        assert!(!array.contains_key(&ArrayKey::Int(10)));
        assert!(matches!(array.get(&ArrayKey::Int(11)), Some(Value::Int(11))));
        assert!(matches!(array.get(&ArrayKey::Int(999)), Some(Value::Int(999))));
        assert_eq!(array.len(), 999);

        array.remove(&ArrayKey::Int(999));
        array.push("tail");
        assert_eq!(array.keys().last(), Some(&ArrayKey::Int(999)));
        array.insert("k", 1);
        array.insert("k", 2);
        assert!(matches!(array.get(&"k".into()), Some(Value::Int(2))));
        assert_eq!(array.len(), 1000);
    }

    #[test]
    fn sorted_values_renumbers_keys() {
        let array: Array = [("x", 3), ("y", 1), ("z", 2)].into_iter().collect();
        let sorted = array.sorted_values();
        let values: Vec<i64> = sorted
            .values()
            .filter_map(|v| match v {
                Value::Int(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(sorted.keys().next(), Some(&ArrayKey::Int(0)));
    }

    #[test]
    fn object_handles_have_identity() {
        let a = Object::new("Point").with_property("x", 1).into_ref();
        let b = Object::new("Point").with_property("x", 1).into_ref();
        let a2 = a.clone();
        assert!(a.ptr_eq(&a2));
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.addr(), a2.addr());
    }

    #[test]
    fn storage_attach_is_identity_based() {
        let item = Object::new("Item").into_ref();
        let mut storage = Object::storage();
        storage.attach(item.clone()).unwrap();
        storage.attach(item).unwrap();
        assert_eq!(storage.attached().len(), 1);

        let mut plain = Object::new("Plain");
        let err = plain.attach(Object::new("Item").into_ref()).unwrap_err();
        assert_eq!(
            err,
            TypeError::NotAStorage {
                class: "Plain".into()
            }
        );
    }

    #[test]
    fn exception_layout() {
        let e = Object::exception("RuntimeException", "Error", 100).with_location("a.php", 12);
        assert!(e.is_exception());
        assert!(matches!(e.property("code"), Some(Value::Int(100))));
        assert!(matches!(e.property("line"), Some(Value::Int(12))));
    }

    #[test]
    fn mock_objects_carry_bookkeeping() {
        let mock = Object::mock("Service");
        assert!(mock.is_mock());
        assert!(mock
            .properties()
            .any(|(name, _)| name.starts_with(MOCK_PROPERTY_PREFIX)));
    }

    #[test]
    fn decimal_and_datetime_literals() {
        assert!(matches!(Value::decimal("13.370000"), Ok(Value::Decimal(_))));
        assert_eq!(
            Value::decimal("foo").unwrap_err(),
            TypeError::InvalidDecimal("foo".into())
        );
        assert!(Value::datetime("2013-03-29T04:13:35-04:00").is_ok());
        assert!(Value::datetime("yesterday").is_err());
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Float(1.0).type_name(), "double");
        assert_eq!(Value::list([1, 2]).type_name(), "array");
        assert_eq!(Value::from(Object::new("A").into_ref()).type_name(), "object");
        assert_eq!(Value::from(Resource::opaque("curl")).type_name(), "resource");
    }
}
