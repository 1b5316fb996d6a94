use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use paperlens_core::env::RuntimeEnv;
use paperlens_export::ExportError;

/// Error categories reported in the `type` field of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    Unauthorized,
    CorsError,
    NotFound,
    UpstreamError,
    ServiceUnavailable,
    ExportError,
    InternalError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::CorsError => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::ExportError | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::CorsError => "CorsError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::UpstreamError => "UpstreamError",
            ErrorKind::ServiceUnavailable => "ServiceUnavailable",
            ErrorKind::ExportError => "ExportError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

/// Unified API error for every handler and middleware.
///
/// Renders `{ status: "error", message, type, details? }`.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    /// Attach the error chain of `source`, except in production.
    pub fn with_source(mut self, env: RuntimeEnv, source: &dyn std::error::Error) -> Self {
        if !env.is_production() {
            self.details = Some(error_chain(source));
        }
        self
    }

    /// Map an export failure, carrying its own message. Agent errors never
    /// reach here on the HTML path, but are upstream failures if they do.
    pub fn export(env: RuntimeEnv, err: &ExportError) -> Self {
        let kind = match err {
            ExportError::Agent(_) => ErrorKind::UpstreamError,
            ExportError::EmptyOutput(_) | ExportError::Pdf(_) | ExportError::Browser(_) => {
                ErrorKind::ExportError
            }
            _ => ErrorKind::InternalError,
        };
        Self::new(kind, err.to_string()).with_source(env, err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        if status.is_server_error() {
            tracing::error!(
                kind = self.kind.as_str(),
                details = self.details.as_deref().unwrap_or_default(),
                "{}",
                self.message
            );
        }

        let body = ErrorBody {
            status: "error",
            message: &self.message,
            kind: self.kind.as_str(),
            details: self.details.as_deref(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
