use serde::Serialize;

use super::conversation::Conversation;
use super::validation::Validation;

/// Everything the HTML step needs, with every gap already defaulted.
///
/// Built once per export so the prompt path and the fallback template read
/// the same values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportPayload {
    pub query: String,
    pub answer: String,
    pub papers: Vec<String>,
    pub summary: String,
    pub validation: Validation,
    /// Whether the conversation carried at least one paper bundle.
    pub has_papers: bool,
}

impl ExportPayload {
    pub fn from_conversation(conversation: &Conversation) -> Self {
        let bundle = conversation.primary_bundle();
        Self {
            query: conversation.query.clone().unwrap_or_default(),
            answer: conversation.answer.clone().unwrap_or_default(),
            papers: bundle.map(|b| b.papers.clone()).unwrap_or_default(),
            summary: bundle.map(|b| b.summary.clone()).unwrap_or_default(),
            validation: bundle.map(|b| b.validation.clone()).unwrap_or_default(),
            has_papers: bundle.is_some(),
        }
    }

    /// Papers joined for inline display, or `"No papers"`.
    pub fn papers_line(&self) -> String {
        if self.papers.is_empty() {
            "No papers".to_string()
        } else {
            self.papers.join(", ")
        }
    }

    /// Summary text, or `"No summary"`.
    pub fn summary_or_placeholder(&self) -> &str {
        if self.summary.trim().is_empty() {
            "No summary"
        } else {
            &self.summary
        }
    }
}
