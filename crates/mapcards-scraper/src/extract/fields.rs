//! Loose field access over untyped JSON objects.

use serde_json::{Map, Value};

/// Script-style truthiness: `null`, `false`, `0` and `""` count as missing.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value under `key`, if it is present and truthy.
pub(super) fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| is_truthy(v))
}

/// First truthy value among `keys`, in order.
pub(super) fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| present(obj, key))
}

pub(super) fn any_present(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    first_present(obj, keys).is_some()
}

/// First non-empty string among `keys`.
pub(super) fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| present(obj, key))
        .find_map(Value::as_str)
        .map(str::to_owned)
}

/// Identifier text: strings as-is, numbers rendered in decimal.
pub(super) fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A number, or a string that parses as one.
pub(super) fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|f| f.is_finite())
}

/// A non-negative count. Fractional values are rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    number(value)
        .filter(|f| *f >= 0.0)
        .map(|f| f.round() as u64)
}

/// A two-element numeric array, order preserved.
pub(super) fn coordinate_pair(value: &Value) -> Option<[f64; 2]> {
    match value.as_array()?.as_slice() {
        [first, second] => Some([number(first)?, number(second)?]),
        _ => None,
    }
}

/// Strings kept; objects contribute the first text found under `object_keys`.
pub(super) fn string_list(value: &Value, object_keys: &[&str]) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let list = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(obj) => first_text(obj, object_keys),
            _ => None,
        })
        .collect();
    Some(list)
}
