use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::lenient;

use super::validation::Validation;

/// A persisted research conversation: the user's query, the assistant's
/// answer, and the paper bundles gathered while answering.
///
/// Written by another component, so every field is optional here and the
/// `papers` list tolerates being absent or not a list at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    #[serde(
        default,
        deserialize_with = "bundles_if_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub papers: Option<Vec<PaperBundle>>,
}

/// Paper-related output attached to a conversation. Only the first bundle
/// is exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperBundle {
    #[serde(default, deserialize_with = "lenient::paper_labels")]
    pub papers: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub summary: String,

    #[serde(default)]
    pub validation: Validation,
}

impl Conversation {
    /// The first paper bundle, if `papers` is a non-empty list.
    pub fn primary_bundle(&self) -> Option<&PaperBundle> {
        self.papers.as_deref().and_then(|bundles| bundles.first())
    }

    /// Query and answer, both required before an export may start.
    ///
    /// Blank strings count as missing.
    pub fn require_query_and_answer(&self) -> Result<(&str, &str), CoreError> {
        let query = non_blank(self.query.as_deref())
            .ok_or_else(|| CoreError::MissingField("query".to_string()))?;
        let answer = non_blank(self.answer.as_deref())
            .ok_or_else(|| CoreError::MissingField("answer".to_string()))?;
        Ok((query, answer))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn bundles_if_list<'de, D>(deserializer: D) -> Result<Option<Vec<PaperBundle>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
