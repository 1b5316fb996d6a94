use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::{ApiError, ErrorKind};
use crate::state::AppState;

/// Reject cross-origin requests from origins outside the allow-list.
///
/// Requests without an `Origin` header (same-origin, curl, server to
/// server) pass through.
pub async fn reject_disallowed_origin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(origin) = req.headers().get(ORIGIN)
        && !state.allowed_origins.iter().any(|allowed| allowed == origin)
    {
        warn!(origin = ?origin, "request from disallowed origin");
        return Err(ApiError::new(ErrorKind::CorsError, "Origin not allowed by CORS policy"));
    }

    Ok(next.run(req).await)
}
