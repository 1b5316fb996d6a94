use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{ApiError, ErrorKind};
use crate::state::AppState;

/// Ensure the database connection before the request proceeds.
pub async fn require_database(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = state.readiness.ensure_ready().await {
        return Err(
            ApiError::new(ErrorKind::ServiceUnavailable, "Database connection failed")
                .with_source(state.env, &e),
        );
    }

    Ok(next.run(req).await)
}
