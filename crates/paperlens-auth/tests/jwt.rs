use jiff::{SignedDuration, Timestamp};

use paperlens_auth::cookie::{SameSite, SessionCookie, SESSION_COOKIE_NAME};
use paperlens_auth::jwt::SESSION_TTL;
use paperlens_auth::{AuthError, JwtKeys};
use paperlens_core::env::RuntimeEnv;

#[test]
fn issued_token_validates_with_seven_day_expiry() {
    let keys = JwtKeys::from_secret("s3cret").unwrap();

    let token = keys.issue("65f0c0ffee").unwrap();
    let claims = keys.validate(&token).unwrap();

    assert_eq!(claims.sub, "65f0c0ffee");
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let issuer = JwtKeys::from_secret("one").unwrap();
    let verifier = JwtKeys::from_secret("two").unwrap();

    let token = issuer.issue("u1").unwrap();

    assert!(matches!(verifier.validate(&token), Err(AuthError::InvalidToken(_))));
}

#[test]
fn expired_token_is_rejected() {
    let keys = JwtKeys::from_secret("s3cret").unwrap();
    let long_ago = Timestamp::now() - SESSION_TTL - SignedDuration::from_hours(1);

    let token = keys.issue_at("u1", long_ago).unwrap();

    assert!(matches!(keys.validate(&token), Err(AuthError::TokenExpired)));
}

#[test]
fn garbage_and_blank_tokens_are_rejected() {
    let keys = JwtKeys::from_secret("s3cret").unwrap();

    assert!(keys.validate("not.a.jwt").is_err());
    assert!(matches!(keys.validate("  "), Err(AuthError::MissingToken)));
}

#[test]
fn empty_secret_is_refused() {
    assert!(matches!(JwtKeys::from_secret(""), Err(AuthError::EmptySecret)));
}

#[test]
fn cookie_is_cross_site_only_in_production() {
    let prod = SessionCookie::for_env(RuntimeEnv::Production);
    assert_eq!(prod.name, SESSION_COOKIE_NAME);
    assert!(prod.http_only);
    assert!(prod.secure);
    assert_eq!(prod.same_site, SameSite::None);
    assert_eq!(prod.max_age, SESSION_TTL);

    let dev = SessionCookie::for_env(RuntimeEnv::Development);
    assert!(dev.http_only);
    assert!(!dev.secure);
    assert_eq!(dev.same_site, SameSite::Lax);
    assert_eq!(dev.path, "/");
}
