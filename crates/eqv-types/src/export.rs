//! Human-readable rendering of values.
//!
//! [`export`] produces the full multi-line rendering used in failure
//! messages and diffs; [`shortened_export`] produces a single-line summary
//! used where a nested value only needs to be identified.

use crate::coerce::float_to_string;
use crate::value::{Array, ArrayKey, EnumBacking, Object, ObjectKind, Value};

const INDENT: &str = "    ";
const SHORT_LIMIT: usize = 40;
const SHORT_HEAD: usize = 30;
const SHORT_TAIL: usize = 7;

/// Render a value in full.
pub fn export(value: &Value) -> String {
    let mut path = Vec::new();
    render(value, 0, &mut path)
}

/// Render an array key: integers bare, strings quoted.
pub fn export_key(key: &ArrayKey) -> String {
    match key {
        ArrayKey::Int(i) => i.to_string(),
        ArrayKey::Str(s) => export_string(s),
    }
}

/// Render a value on one line, eliding long strings and nested structure.
pub fn shortened_export(value: &Value) -> String {
    match value {
        Value::Str(_) => {
            let rendered: String = export(value).chars().filter(|c| *c != '\n').collect();
            let len = rendered.chars().count();
            if len <= SHORT_LIMIT {
                return rendered;
            }
            let head: String = rendered.chars().take(SHORT_HEAD).collect();
            let tail: String = rendered.chars().skip(len - SHORT_TAIL).collect();
            format!("{head}...{tail}")
        }
        Value::Array(array) if array.is_empty() => "Array []".into(),
        Value::Array(_) => "Array [...]".into(),
        Value::Object(object) => {
            let object = object.borrow();
            let has_members = object.properties().next().is_some() || !object.attached().is_empty();
            let body = if has_members { "..." } else { "" };
            format!("{} Object ({body})", object.class())
        }
        _ => export(value),
    }
}

/// The property map of an object as an array.
pub fn to_array(object: &Object) -> Array {
    let mut array = Array::new();
    for (name, value) in object.properties() {
        array.insert(name, value.clone());
    }
    array
}

fn render(value: &Value, depth: usize, path: &mut Vec<usize>) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => {
            let s = float_to_string(*f);
            if s.contains(['.', 'E', 'N', 'I']) {
                s
            } else {
                format!("{s}.0")
            }
        }
        Value::Str(s) => export_string(s),
        Value::Array(array) => render_array(array, depth, path),
        Value::Object(object) => {
            let addr = object.addr();
            let object = object.borrow();
            let header = format!("{} Object #{}", object.class(), object.id());
            if path.contains(&addr) {
                return format!("{header} (*RECURSION*)");
            }
            path.push(addr);
            let body = render_object_body(&object, depth, path);
            path.pop();
            format!("{header} {body}")
        }
        Value::Decimal(d) => d.to_string(),
        Value::DateTime(dt) => format!("DateTime({})", dt.format("%Y-%m-%dT%H:%M:%S%.6f%z")),
        Value::Enum(case) => match case.backing() {
            None => format!("{} Enum ({})", case.enum_type(), case.case()),
            Some(backing) => {
                let backing = match backing {
                    EnumBacking::Int(i) => i.to_string(),
                    EnumBacking::Str(s) => export_string(s),
                };
                format!("{} Enum ({}, {backing})", case.enum_type(), case.case())
            }
        },
        Value::Resource(resource) => {
            format!("resource({}) of type ({})", resource.id(), resource.kind())
        }
        Value::Closure(closure) => format!("Closure Object #{} ()", closure.id()),
        Value::Xml(node) => node.canonical_text(),
    }
}

fn render_array(array: &Array, depth: usize, path: &mut Vec<usize>) -> String {
    if array.is_empty() {
        return "Array []".into();
    }
    let inner = INDENT.repeat(depth + 1);
    let mut out = String::from("Array [\n");
    for (key, value) in array.iter() {
        out.push_str(&format!(
            "{inner}{} => {},\n",
            export_key(key),
            render(value, depth + 1, path)
        ));
    }
    out.push_str(&INDENT.repeat(depth));
    out.push(']');
    out
}

fn render_object_body(object: &Object, depth: usize, path: &mut Vec<usize>) -> String {
    let inner = INDENT.repeat(depth + 1);
    let mut entries = Vec::new();
    for (name, value) in object.properties() {
        entries.push(format!(
            "{inner}{} => {},\n",
            export_string(name),
            render(value, depth + 1, path)
        ));
    }
    if let ObjectKind::Storage(attached) = object.kind() {
        for (index, item) in attached.iter().enumerate() {
            let item = Value::Object(item.clone());
            entries.push(format!("{inner}{index} => {},\n", render(&item, depth + 1, path)));
        }
    }
    if entries.is_empty() {
        return "()".into();
    }
    format!("(\n{}{})", entries.concat(), INDENT.repeat(depth))
}

fn is_binary(s: &str) -> bool {
    s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0e..=0x1a | 0x1c..=0x1f))
}

fn export_string(s: &str) -> String {
    if is_binary(s) {
        return format!("Binary String: 0x{}", hex::encode(s.as_bytes()));
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str("\\r\\n\n");
            }
            '\n' if chars.peek() == Some(&'\r') => {
                chars.next();
                out.push_str("\\n\\r\n");
            }
            '\r' => out.push_str("\\r\n"),
            '\n' => out.push_str("\\n\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
