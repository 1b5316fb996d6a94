//! Attributes of the session cookie.
//!
//! Kept free of any HTTP crate; the server maps [`SessionCookie`] onto its
//! own cookie type.

use jiff::SignedDuration;

use paperlens_core::env::RuntimeEnv;

use crate::jwt::SESSION_TTL;

pub const SESSION_COOKIE_NAME: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub path: &'static str,
    pub max_age: SignedDuration,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl SessionCookie {
    /// Production serves the frontend from another site, which needs
    /// `Secure; SameSite=None`. Everywhere else stays `Lax` so plain-http
    /// localhost keeps working.
    pub fn for_env(env: RuntimeEnv) -> Self {
        let production = env.is_production();
        Self {
            name: SESSION_COOKIE_NAME,
            path: "/",
            max_age: SESSION_TTL,
            http_only: true,
            secure: production,
            same_site: if production { SameSite::None } else { SameSite::Lax },
        }
    }
}
