//! paperlens-auth
//!
//! Session tokens (HS256 JWT) and the cookie that carries them.

pub mod cookie;
pub mod error;
pub mod jwt;

pub use crate::error::AuthError;
pub use crate::jwt::{Claims, JwtKeys};
