use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use tracing::debug;

use paperlens_core::models::conversation::Conversation;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The conversation named by the route, looked up before the handler runs.
/// `None` when no conversation with that id belongs to the caller.
#[derive(Clone, Debug)]
pub struct ResolvedConversation(pub Option<Conversation>);

pub async fn resolve_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(user): Extension<AuthUser>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let conversation = state
        .conversations
        .find_owned(&id, &user.user_id)
        .await
        .map_err(|e| ApiError::internal("Failed to load conversation").with_source(state.env, &e))?;

    debug!(conversation_id = %id, found = conversation.is_some(), "conversation resolved");
    req.extensions_mut().insert(ResolvedConversation(conversation));

    Ok(next.run(req).await)
}
