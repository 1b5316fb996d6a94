//! Forgiving deserializers for records written by other services.
//!
//! Conversations are persisted by a different component, so shapes drift:
//! a list may be stored as a single string, a bundle may be `null`. These
//! helpers decode what they can and default the rest instead of failing the
//! whole record.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Accept a single string or a list of strings.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items.into_iter().filter_map(label_of).collect(),
        _ => Vec::new(),
    })
}

/// Accept a list of paper titles or ids. Object entries contribute their
/// `title` (or `id`) field.
pub fn paper_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(label_of).collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Accept any JSON object; everything else becomes an empty map.
pub fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    })
}

/// Accept a string, treating `null` and non-strings as empty.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn label_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get("title")
            .or_else(|| map.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
