use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use paperlens_auth::cookie::SESSION_COOKIE_NAME;
use paperlens_auth::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user, inserted into request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
}

/// JWT validation middleware.
///
/// Takes the session token from the `token` cookie, or failing that from
/// `Authorization: Bearer <token>`, and validates it.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let keys = state.jwt.as_ref().ok_or_else(|| ApiError::internal("JWT_SECRET is not configured"))?;

    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_string)
        })
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let claims = keys.validate(&token).map_err(|e| {
        debug!(error = %e, "session token rejected");
        match e {
            AuthError::TokenExpired => ApiError::unauthorized("Session expired"),
            AuthError::MissingToken => ApiError::unauthorized("Authentication required"),
            _ => ApiError::unauthorized("Invalid session token"),
        }
    })?;

    req.extensions_mut().insert(AuthUser { user_id: claims.sub });

    Ok(next.run(req).await)
}
