// Tolerant traversal helpers for spec documents
// Missing or mistyped sections read as empty defaults instead of failing,
// so partial and malformed specs degrade to absence.

use serde_json::Value;

const EMPTY: &[Value] = &[];

/// Sequence under `key`, or an empty slice when absent or not an array.
pub fn seq<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(EMPTY)
}

/// String under `key`, or `default` when absent or not a string.
pub fn str_or<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Bool under `key`, or `default` when absent or not a bool.
pub fn bool_or(value: &Value, key: &str, default: bool) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Declared `schema.type` of a parameter. The type defaults to "string" only
/// when the key is missing; a present non-string value matches nothing.
pub fn schema_type(param: &Value) -> &str {
    match param.get("schema").and_then(|schema| schema.get("type")) {
        Some(declared) => declared.as_str().unwrap_or(""),
        None => "string",
    }
}
