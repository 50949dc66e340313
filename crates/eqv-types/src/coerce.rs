//! Loose coercion rules.
//!
//! These are the conversions a weakly typed runtime applies when two values
//! of different types meet: numeric strings, string conversion, truthiness,
//! loose equality and the ordering used when sorting mixed arrays.

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::value::{Array, Value};

/// A number parsed out of an integer, a float or a numeric string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn loose_eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }

    fn sort_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => int_float_cmp(a, b),
            (Number::Float(a), Number::Int(b)) => int_float_cmp(b, a).reverse(),
            (Number::Float(a), Number::Float(b)) => float_cmp(a, b),
        }
    }
}

/// `true` when `s` is a numeric literal: optional surrounding whitespace,
/// optional sign, digits with an optional fraction, optional exponent.
pub fn is_numeric(s: &str) -> bool {
    numeric_shape(s).is_some()
}

/// Parse a numeric string. Integer literals that overflow `i64` become floats.
pub fn parse_numeric(s: &str) -> Option<Number> {
    let (literal, integral) = numeric_shape(s)?;
    if integral {
        if let Ok(i) = literal.parse::<i64>() {
            return Some(Number::Int(i));
        }
    }
    literal.parse::<f64>().ok().map(Number::Float)
}

/// Returns the trimmed literal and whether it has integer form.
fn numeric_shape(s: &str) -> Option<(&str, bool)> {
    let literal = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = literal.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    let mut frac_digits = 0;
    let mut integral = true;
    if i < bytes.len() && bytes[i] == b'.' {
        integral = false;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        integral = false;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    (i == bytes.len()).then_some((literal, integral))
}

/// The number a value stands for under loose comparison, if any.
fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        Value::Str(s) => parse_numeric(s),
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Decimal(d) => Some(d.clone()),
        Value::Int(i) => Some(BigDecimal::from(*i)),
        Value::Float(f) if f.is_finite() => BigDecimal::from_str(&f.to_string()).ok(),
        Value::Str(s) if is_numeric(s) => BigDecimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Render a float the way the runtime converts floats to strings: the
/// shortest round-tripping digits, scientific (`1.0E+25`) outside `[1e-4, 1e15)`.
pub fn float_to_string(f: f64) -> String {
    if f.is_nan() {
        return "NAN".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF".into() } else { "-INF".into() };
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0".into() } else { "0".into() };
    }
    let scientific = format!("{f:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..15).contains(&exponent) {
        return f.to_string();
    }
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{}", exponent.abs())
}

/// String conversion of a value. Objects without a string representation
/// render as their class name.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".into(),
        Value::Bool(false) => String::new(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float_to_string(*f),
        Value::Str(s) => s.clone(),
        Value::Array(_) => "Array".into(),
        Value::Object(object) => {
            let object = object.borrow();
            object
                .as_string()
                .map_or_else(|| object.class().to_string(), str::to_string)
        }
        Value::Decimal(d) => d.to_string(),
        Value::DateTime(dt) => dt.to_rfc3339(),
        Value::Enum(case) => case.case().to_string(),
        Value::Resource(resource) => format!("Resource id #{}", resource.id()),
        Value::Closure(_) => "Closure".into(),
        Value::Xml(node) => node.canonical_text(),
    }
}

/// Truthiness.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Str(s) => !(s.is_empty() || s == "0"),
        Value::Array(array) => !array.is_empty(),
        Value::Decimal(d) => *d != BigDecimal::from(0),
        _ => true,
    }
}

/// Loose (`==`) equality.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    loose_eq_in(a, b, &mut Vec::new())
}

/// `seen` holds the object pairs already being compared; meeting one again
/// counts as equal so that cyclic graphs terminate.
fn loose_eq_in(a: &Value, b: &Value, seen: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::Str(s)) | (Value::Str(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !to_bool(other),
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == to_bool(other),

        (Value::Str(x), Value::Str(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(nx), Some(ny)) => nx.loose_eq(ny),
            _ => x == y,
        },
        (Value::Int(_) | Value::Float(_), Value::Str(s)) => match parse_numeric(s) {
            Some(n) => as_number(a).is_some_and(|m| m.loose_eq(n)),
            None => to_display_string(a) == *s,
        },
        (Value::Str(s), Value::Int(_) | Value::Float(_)) => match parse_numeric(s) {
            Some(n) => as_number(b).is_some_and(|m| m.loose_eq(n)),
            None => to_display_string(b) == *s,
        },
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (as_number(a), as_number(b)) {
                (Some(x), Some(y)) => x.loose_eq(y),
                _ => false,
            }
        }

        (Value::Array(x), Value::Array(y)) => arrays_loose_eq(x, y, seen),

        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.addr(), y.addr());
            if seen.contains(&pair) {
                return true;
            }
            let (x, y) = (x.borrow(), y.borrow());
            if x.class() != y.class() || x.properties().count() != y.properties().count() {
                return false;
            }
            seen.push(pair);
            let equal = x.properties().all(|(name, value)| {
                y.property(name)
                    .is_some_and(|other| loose_eq_in(value, other, seen))
            });
            seen.pop();
            equal
        }
        (Value::Object(object), Value::Str(s)) | (Value::Str(s), Value::Object(object)) => {
            object.borrow().as_string() == Some(s.as_str())
        }

        (Value::Decimal(_), _) | (_, Value::Decimal(_)) => {
            match (as_decimal(a), as_decimal(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::DateTime(x), Value::DateTime(y)) => x == y,
        (Value::Enum(x), Value::Enum(y)) => x.enum_type() == y.enum_type() && x.case() == y.case(),
        (Value::Resource(x), Value::Resource(y)) => x.ptr_eq(y),
        (Value::Closure(x), Value::Closure(y)) => x.ptr_eq(y),
        (Value::Xml(x), Value::Xml(y)) => x.canonical_text() == y.canonical_text(),
        _ => false,
    }
}

fn arrays_loose_eq(x: &Array, y: &Array, seen: &mut Vec<(usize, usize)>) -> bool {
    x.len() == y.len()
        && x.iter().all(|(key, value)| {
            y.get(key)
                .is_some_and(|other| loose_eq_in(value, other, seen))
        })
}

/// Ordering classes, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortClass {
    Null,
    Bool,
    /// Integers, floats, decimals and numeric strings.
    Number,
    /// Non-numeric strings.
    Text,
    Array,
    DateTime,
    Other,
}

fn sort_class(value: &Value) -> SortClass {
    match value {
        Value::Null => SortClass::Null,
        Value::Bool(_) => SortClass::Bool,
        Value::Int(_) | Value::Float(_) | Value::Decimal(_) => SortClass::Number,
        Value::Str(s) if is_numeric(s) => SortClass::Number,
        Value::Str(_) => SortClass::Text,
        Value::Array(_) => SortClass::Array,
        Value::DateTime(_) => SortClass::DateTime,
        _ => SortClass::Other,
    }
}

/// Floats with NaN after every other number.
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64))
        .then_with(|| whole.partial_cmp(&f).unwrap_or(Ordering::Equal))
}

fn approximate(value: &Value) -> f64 {
    match value {
        Value::Decimal(d) => d.to_string().parse().unwrap_or(f64::NAN),
        other => as_number(other).map_or(f64::NAN, Number::as_f64),
    }
}

fn numeric_cmp(a: &Value, b: &Value) -> Ordering {
    if matches!(a, Value::Decimal(_)) || matches!(b, Value::Decimal(_)) {
        return match (as_decimal(a), as_decimal(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => float_cmp(approximate(a), approximate(b)),
        };
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.sort_cmp(y),
        _ => Ordering::Equal,
    }
}

/// Breaks ties between numerically equal values of different shapes.
fn numeric_shape_rank(value: &Value) -> u8 {
    match value {
        Value::Int(_) => 0,
        Value::Float(_) => 1,
        Value::Decimal(_) => 2,
        _ => 3,
    }
}

/// Total ordering used when sorting values loosely.
///
/// Values are grouped null, booleans, numbers (numeric strings included,
/// NaN last), other strings, arrays, date-times, then everything else.
/// Numbers compare numerically, strings lexically, arrays by size then
/// element-wise. Ties inside a group fall back to the string form, so the
/// result of a sort does not depend on the input order.
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    let class = sort_class(a);
    class.cmp(&sort_class(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.values()
                .zip(y.values())
                .map(|(l, r)| loose_cmp(l, r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::DateTime(x), Value::DateTime(y)) => x
            .cmp(y)
            .then_with(|| x.to_rfc3339().cmp(&y.to_rfc3339())),
        _ if class == SortClass::Number => numeric_cmp(a, b)
            .then_with(|| numeric_shape_rank(a).cmp(&numeric_shape_rank(b)))
            .then_with(|| to_display_string(a).cmp(&to_display_string(b))),
        _ => a
            .type_name()
            .cmp(b.type_name())
            .then_with(|| to_display_string(a).cmp(&to_display_string(b))),
    })
}
