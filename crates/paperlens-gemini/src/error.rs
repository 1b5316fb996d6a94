use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Gemini request exceeded its {deadline:?} deadline")]
    Timeout { deadline: Duration },

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),
}

impl GeminiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeminiError::Timeout { .. })
    }
}
