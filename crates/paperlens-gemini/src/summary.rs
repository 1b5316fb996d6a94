use tracing::{info, warn};

use paperlens_core::models::paper::PaperMetadata;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::models::SUMMARY_MODEL;
use crate::prompts;

/// Summarize search results for a research query.
///
/// With no client configured this returns an empty string without touching
/// the network. Remote failures are returned as-is; there is no fallback.
pub async fn summarize_papers(
    client: Option<&GeminiClient>,
    papers: &[PaperMetadata],
    query: &str,
) -> Result<String, GeminiError> {
    let Some(client) = client else {
        warn!("GEMINI_API not configured, returning empty summary");
        return Ok(String::new());
    };

    info!(papers = papers.len(), model = SUMMARY_MODEL, "summarizing papers");

    let prompt = prompts::summary_prompt(papers, query);
    let summary = client.generate_content(SUMMARY_MODEL, &prompt).await?;

    info!(chars = summary.len(), "summary generated");

    Ok(summary)
}
