use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use super::tokens::TokenKind;
use crate::state::AppState;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed, lowercased address, or `None` when it does not look like one.
pub fn normalize_email(raw: &str) -> Option<String> {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    let email = raw.trim().to_lowercase();
    EMAIL_RE.is_match(&email).then_some(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("stored hash unreadable: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0:?} token required")]
    WrongTokenKind(TokenKind),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

/// Token of an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Caller identified by a valid access token. Every route that reads or
/// writes per-user data takes this, so unauthenticated requests get a 401
/// before the handler body runs.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let user_id = state
            .jwt
            .verify(token, TokenKind::Access)
            .inspect_err(|e| warn!(error = %e, "request rejected"))?;
        Ok(AuthUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut req = Request::get("/");
        if let Some(value) = auth {
            req = req.header(AUTHORIZATION, value);
        }
        req.body(()).unwrap().into_parts().0
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("Secur3P@ssw0rd!").unwrap();
        assert!(verify_password("Secur3P@ssw0rd!", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(
            normalize_email("  Jo@Example.COM "),
            Some("jo@example.com".to_string())
        );
        assert_eq!(normalize_email("jo@example"), None);
        assert_eq!(normalize_email("jo example@x.com"), None);
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("BEARER abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn extractor_accepts_access_token() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        let token = state.jwt.issue(user_id).unwrap().access_token;
        let mut parts = parts_with(Some(&format!("Bearer {}", token)));
        let AuthUser(got) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .ok()
            .expect("access token accepted");
        assert_eq!(got, user_id);
    }

    #[tokio::test]
    async fn extractor_rejects_refresh_token() {
        let state = AppState::fake();
        let token = state.jwt.issue(Uuid::new_v4()).unwrap().refresh_token;
        let mut parts = parts_with(Some(&format!("Bearer {}", token)));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("refresh token rejected");
        assert!(matches!(err, AuthError::WrongTokenKind(TokenKind::Access)));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn extractor_rejects_missing_header() {
        let state = AppState::fake();
        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("missing header rejected");
        assert!(matches!(err, AuthError::MissingToken));
    }
}
