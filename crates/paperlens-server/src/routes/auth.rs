use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use paperlens_auth::cookie::{self, SessionCookie};
use paperlens_core::models::user::SignInProfile;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub message: &'static str,
    pub user_id: String,
}

/// Find or create the user and set the session cookie.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignInProfile>, JsonRejection>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let Json(profile) = payload?;

    let email = profile.normalized_email();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation("A valid email is required"));
    }

    let keys = state
        .jwt
        .as_ref()
        .ok_or_else(|| ApiError::internal("JWT_SECRET is not configured"))?;

    let user_id = state
        .users
        .find_or_create(profile)
        .await
        .map_err(|e| ApiError::internal("Failed to sign in").with_source(state.env, &e))?;

    let token = keys
        .issue(&user_id)
        .map_err(|e| ApiError::internal("Failed to issue session token").with_source(state.env, &e))?;

    let jar = jar.add(session_cookie(SessionCookie::for_env(state.env), token));

    Ok((
        jar,
        Json(MessageResponse {
            message: "Sign-in successful",
        }),
    ))
}

pub async fn verify(Extension(user): Extension<AuthUser>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token exists",
        user_id: user.user_id,
    })
}

fn session_cookie(policy: SessionCookie, token: String) -> Cookie<'static> {
    let same_site = match policy.same_site {
        cookie::SameSite::Lax => SameSite::Lax,
        cookie::SameSite::None => SameSite::None,
    };

    Cookie::build((policy.name, token))
        .path(policy.path)
        .http_only(policy.http_only)
        .secure(policy.secure)
        .same_site(same_site)
        .max_age(time::Duration::seconds(policy.max_age.as_secs()))
        .build()
}
