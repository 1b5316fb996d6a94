use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use paperlens_core::models::conversation::Conversation;
use paperlens_core::models::payload::ExportPayload;
use paperlens_gemini::html::{format_html_within, HTML_DEADLINE};
use paperlens_gemini::GeminiClient;

use crate::error::ExportError;
use crate::render::render_fallback;
use crate::BoxFuture;

/// Something that can lay out an export payload as an HTML document.
///
/// Implementations must give up once `deadline` has passed.
pub trait HtmlAgent: Send + Sync {
    fn format_html<'a>(
        &'a self,
        payload: &'a ExportPayload,
        deadline: Duration,
    ) -> BoxFuture<'a, Result<String, ExportError>>;
}

impl HtmlAgent for GeminiClient {
    fn format_html<'a>(
        &'a self,
        payload: &'a ExportPayload,
        deadline: Duration,
    ) -> BoxFuture<'a, Result<String, ExportError>> {
        Box::pin(async move { Ok(format_html_within(self, payload, deadline).await?) })
    }
}

/// The HTML step of an export.
///
/// Uses the agent when there is something to format and an agent is
/// configured; every other path, including agent failure, renders the
/// fallback template from the same payload.
#[derive(Clone)]
pub struct HtmlStep {
    agent: Option<Arc<dyn HtmlAgent>>,
    deadline: Duration,
}

impl HtmlStep {
    pub fn new(agent: Option<Arc<dyn HtmlAgent>>) -> Self {
        Self {
            agent,
            deadline: HTML_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    pub async fn generate(&self, conversation: &Conversation) -> Result<String, ExportError> {
        let payload = ExportPayload::from_conversation(conversation);

        if !payload.has_papers {
            warn!("conversation has no papers, using fallback template");
            return render_fallback(&payload);
        }

        let Some(agent) = &self.agent else {
            warn!("GEMINI_API not configured, using fallback template");
            return render_fallback(&payload);
        };

        match agent.format_html(&payload, self.deadline).await {
            Ok(html) if !html.trim().is_empty() => {
                info!(bytes = html.len(), "HTML generated by agent");
                Ok(html)
            }
            Ok(_) => {
                warn!("HTML agent returned an empty document, using fallback template");
                render_fallback(&payload)
            }
            Err(e) if e.is_timeout() => {
                warn!(deadline_ms = self.deadline.as_millis() as u64, "HTML agent timed out, using fallback template");
                render_fallback(&payload)
            }
            Err(e) => {
                error!(error = %e, "HTML agent failed, using fallback template");
                render_fallback(&payload)
            }
        }
    }
}
