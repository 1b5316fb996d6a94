use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Keys a validity flag has been stored under.
const VALIDITY_KEYS: [&str; 3] = ["Is Valid", "isValid", "is_valid"];

/// Free-form validation record produced alongside a paper bundle.
///
/// Only the validity flag has meaning to the exporter, and only for styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Validation(pub Map<String, Value>);

impl<'de> Deserialize<'de> for Validation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::object_or_empty(deserializer).map(Validation)
    }
}

impl Validation {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The validity flag, if one was recorded as a bool or a "true"/"false"
    /// string.
    pub fn is_valid(&self) -> Option<bool> {
        VALIDITY_KEYS
            .iter()
            .find_map(|key| self.0.get(*key))
            .and_then(|value| match value {
                Value::Bool(b) => Some(*b),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            })
    }

    /// Compact JSON, as embedded in prompts.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Key/value pairs rendered for display. Strings are shown unquoted.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Validation {
    fn from(map: Map<String, Value>) -> Self {
        Validation(map)
    }
}
