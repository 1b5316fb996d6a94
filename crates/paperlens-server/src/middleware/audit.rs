use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request id, available to handlers through request extensions.
#[derive(Debug, Clone, Copy)]
pub struct RequestId(pub Uuid);

/// Audit logging middleware.
///
/// Logs every API request as a structured event using `tracing` and echoes
/// the request id back in `x-request-id`.
pub async fn audit_log(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let started = Instant::now();

    req.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        request_id = %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
