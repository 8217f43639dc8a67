//! Wire casing conversion.
//!
//! The gateway speaks snake_case; everything downstream of the normalizer
//! reads camelCase. Conversion is recursive over objects and arrays and
//! never touches values, only keys.

use serde_json::{Map, Value};

/// Converts every object key in `value` from snake_case to camelCase.
#[must_use]
pub fn to_camel_case(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (camel_key(&key), to_camel_case(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(to_camel_case).collect()),
        other => other,
    }
}

/// Converts a single key: each underscore is dropped and the character after
/// it upper-cased. A trailing underscore is kept.
#[must_use]
pub fn camel_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars();
    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => out.extend(next.to_uppercase()),
            None => out.push('_'),
        }
    }
    out
}
