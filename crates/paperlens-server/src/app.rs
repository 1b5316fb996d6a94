use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// Build the application router.
///
/// Layer order, outermost first: audit, CORS, origin gate. Every route but
/// `/health` then passes the database gate; protected routes add auth, and
/// export additionally resolves its conversation.
pub fn build_router(state: AppState) -> Router {
    let export = Router::new()
        .route("/export/{id}", post(routes::export::export_conversation))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::conversation::resolve_conversation,
        ));

    let protected = Router::new()
        .route("/auth/verify", get(routes::auth::verify))
        .route("/summarize", post(routes::summarize::summarize))
        .merge(export)
        .route_layer(from_fn_with_state(state.clone(), middleware::auth::require_auth));

    let needs_database = Router::new()
        .route("/auth/signin", post(routes::auth::signin))
        .merge(protected)
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::database::require_database,
        ));

    Router::new()
        // Health (no auth, no database)
        .route("/health", get(routes::health::health_check))
        .merge(needs_database)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::origin::reject_disallowed_origin,
        ))
        .layer(cors_layer(&state.allowed_origins))
        .layer(from_fn(middleware::audit::audit_log))
        .with_state(state)
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
