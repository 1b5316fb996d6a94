use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Session lifetime, shared by the token and the cookie.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (hex ObjectId).
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for `user_id` valid for [`SESSION_TTL`] from now.
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, Timestamp::now())
    }

    pub fn issue_at(&self, user_id: &str, now: Timestamp) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_second(),
            exp: now.as_second() + SESSION_TTL.as_secs(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(sub = %claims.sub, exp = claims.exp, "session token issued");
        Ok(token)
    }

    /// Verify signature and expiry and return the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidToken
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidToken(e.to_string()),
                _ => AuthError::Jwt(e),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(data.claims)
    }
}
