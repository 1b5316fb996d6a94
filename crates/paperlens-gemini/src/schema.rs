//! Wire types for `models/{model}:generateContent`.
//!
//! Only the fields this service reads are modelled. Decoding goes through
//! [`GenerateContentResponse::into_text`], which turns every missing link in
//! `candidates[0].content.parts[0].text` into a
//! [`GeminiError::SchemaViolation`] instead of an empty string.

use serde::{Deserialize, Serialize};

use crate::error::GeminiError;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn into_text(self) -> Result<String, GeminiError> {
        let block_reason = self
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!(" (prompt blocked: {r})"))
            .unwrap_or_default();

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            GeminiError::SchemaViolation(format!("response has no candidates{block_reason}"))
        })?;

        let finish = candidate
            .finish_reason
            .map(|r| format!(" (finish reason: {r})"))
            .unwrap_or_default();

        let content = candidate.content.ok_or_else(|| {
            GeminiError::SchemaViolation(format!("first candidate has no content{finish}"))
        })?;

        content
            .parts
            .into_iter()
            .next()
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                GeminiError::SchemaViolation(format!("first candidate has no text part{finish}"))
            })
    }
}
