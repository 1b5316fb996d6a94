use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::middleware::conversation::ResolvedConversation;
use crate::state::AppState;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_DISPOSITION: &str = "attachment; filename=conversation.pdf";

/// Export the resolved conversation as a PDF download.
pub async fn export_conversation(
    State(state): State<AppState>,
    Extension(ResolvedConversation(conversation)): Extension<ResolvedConversation>,
) -> Result<Response, ApiError> {
    let Some(conversation) = conversation else {
        return Err(ApiError::not_found("Conversation not found"));
    };

    if let Err(e) = conversation.require_query_and_answer() {
        warn!(error = %e, "refusing to export incomplete conversation");
        return Err(ApiError::validation(
            "Invalid conversation data: missing query or answer",
        ));
    }

    let pdf = state
        .exporter
        .export(&conversation)
        .await
        .map_err(|e| ApiError::export(state.env, &e))?;

    info!(bytes = pdf.len(), "conversation exported");

    Ok((
        [(CONTENT_TYPE, PDF_CONTENT_TYPE), (CONTENT_DISPOSITION, PDF_DISPOSITION)],
        pdf,
    )
        .into_response())
}
