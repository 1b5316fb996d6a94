use std::time::Duration;

use tracing::info;

use paperlens_core::models::payload::ExportPayload;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::models::HTML_MODEL;
use crate::prompts;

/// Deadline for the formatting call.
pub const HTML_DEADLINE: Duration = Duration::from_secs(15);

/// Ask the model to lay out a conversation as a standalone HTML document.
///
/// The model's text is returned verbatim. Callers decide what to do on
/// error; this never substitutes a template.
pub async fn format_html(client: &GeminiClient, payload: &ExportPayload) -> Result<String, GeminiError> {
    format_html_within(client, payload, HTML_DEADLINE).await
}

/// [`format_html`] with an explicit deadline.
pub async fn format_html_within(
    client: &GeminiClient,
    payload: &ExportPayload,
    deadline: Duration,
) -> Result<String, GeminiError> {
    info!(model = HTML_MODEL, papers = payload.papers.len(), "formatting conversation as HTML");

    let prompt = prompts::html_prompt(payload);
    let html = client
        .generate_content_within(HTML_MODEL, &prompt, deadline)
        .await?;

    info!(bytes = html.len(), "HTML formatted by model");

    Ok(html)
}
