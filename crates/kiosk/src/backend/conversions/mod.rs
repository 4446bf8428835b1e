//! Conversion of arbitrary upstream payloads into canonical records.
//!
//! Upstream systems expose the same concept under different field names
//! depending on deployment, so every field is resolved through an ordered
//! alias list tried in sequence; the first present, non-empty value wins.
//! Schema drift upstream is then a data change here, not a code change.

mod catalog;
mod identity;

pub use catalog::{normalize_catalog, normalize_product};
pub use identity::{FALLBACK_DISPLAY_NAME, IdentityError, normalize_identity};

use serde_json::{Map, Value};

/// First alias whose value is a non-empty scalar, stringified.
///
/// Strings are trimmed; numbers are rendered in their JSON form. Booleans,
/// arrays, and objects never resolve.
fn first_scalar(map: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|key| scalar_string(map.get(*key)?))
}

/// First alias whose value is a non-empty string, trimmed.
fn first_string(map: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|key| trimmed_string(map.get(*key)?))
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => trimmed_string(value),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn trimmed_string(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Name of a JSON value's kind, for diagnostics.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
