use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("no session token provided")]
    MissingToken,

    #[error("JWT secret is empty")]
    EmptySecret,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
