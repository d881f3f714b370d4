//! Field path nesting shared by every compiled node

use serde_json::{Map, Value};

/// Build `{"a": {"b": leaf}}` from the dotted path `a.b`.
///
/// The deepest segment maps to the leaf, each enclosing segment wraps the
/// previous result.
pub fn nest(path: &str, leaf: Value) -> Value {
    path.rsplit('.')
        .fold(leaf, |inner, segment| single(segment.to_string(), inner))
}

/// Build the node for one field comparison.
///
/// Without an operator the nested path object is the node itself (equality).
/// With an operator, `operator_inside` decides the nesting order:
///
/// - `false`: `{op: {a: {b: leaf}}}`, the form for scalar fields
/// - `true`: `{a: {b: {op: leaf}}}`, the form for array fields
pub fn field_node(path: &str, operator: Option<&str>, leaf: Value, operator_inside: bool) -> Value {
    match operator {
        None => nest(path, leaf),
        Some(op) if operator_inside => nest(path, single(op.to_string(), leaf)),
        Some(op) => single(op.to_string(), nest(path, leaf)),
    }
}

/// An object with exactly one entry.
pub fn single(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}
