use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use paperlens_core::models::paper::PaperMetadata;
use paperlens_gemini::summary::summarize_papers;

use crate::error::{ApiError, ErrorKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub papers: Vec<PaperMetadata>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Summarize the given papers against the query.
///
/// Without a Gemini key the summary is empty rather than an error.
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(req) = payload?;

    if req.papers.is_empty() {
        return Err(ApiError::validation("At least one paper is required"));
    }

    let summary = summarize_papers(state.gemini.as_ref(), &req.papers, &req.query)
        .await
        .map_err(|e| {
            ApiError::new(ErrorKind::UpstreamError, "Summarization failed").with_source(state.env, &e)
        })?;

    Ok(Json(SummarizeResponse { summary }))
}
