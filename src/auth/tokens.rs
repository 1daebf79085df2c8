use std::time::Duration;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::services::AuthError;
use crate::config::JwtConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
    iss: String,
    aud: String,
    kind: TokenKind,
}

/// Freshly issued credentials for one user.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// HS256 keys and validation rules, built once at startup.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

fn minutes(value: i64) -> Duration {
    Duration::from_secs(u64::try_from(value).unwrap_or(0) * 60)
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[cfg.issuer.as_str()]);
        validation.set_audience(&[cfg.audience.as_str()]);
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: minutes(cfg.ttl_minutes),
            refresh_ttl: minutes(cfg.refresh_ttl_minutes),
        }
    }

    fn sign(&self, user_id: Uuid, kind: TokenKind) -> anyhow::Result<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now.saturating_add_unsigned(ttl.as_secs()),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn issue(&self, user_id: Uuid) -> anyhow::Result<TokenPair> {
        let pair = TokenPair {
            access_token: self.sign(user_id, TokenKind::Access)?,
            refresh_token: self.sign(user_id, TokenKind::Refresh)?,
            expires_in: self.access_ttl.as_secs(),
        };
        debug!(%user_id, "token pair issued");
        Ok(pair)
    }

    /// Subject of a token that passes signature, expiry, issuer and audience
    /// checks and is of the `expected` kind.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AuthError::InvalidToken
        })?;
        if data.claims.kind != expected {
            return Err(AuthError::WrongTokenKind(expected));
        }
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
            refresh_ttl_minutes: 60,
        }
    }

    #[test]
    fn access_token_verifies_as_access() {
        let keys = JwtKeys::from_config(&config());
        let user_id = Uuid::new_v4();
        let pair = keys.issue(user_id).unwrap();
        assert_eq!(pair.expires_in, 300);
        assert_eq!(keys.verify(&pair.access_token, TokenKind::Access).unwrap(), user_id);
    }

    #[test]
    fn refresh_token_verifies_as_refresh() {
        let keys = JwtKeys::from_config(&config());
        let user_id = Uuid::new_v4();
        let pair = keys.issue(user_id).unwrap();
        assert_eq!(keys.verify(&pair.refresh_token, TokenKind::Refresh).unwrap(), user_id);
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let keys = JwtKeys::from_config(&config());
        let pair = keys.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            keys.verify(&pair.access_token, TokenKind::Refresh),
            Err(AuthError::WrongTokenKind(TokenKind::Refresh))
        ));
        assert!(matches!(
            keys.verify(&pair.refresh_token, TokenKind::Access),
            Err(AuthError::WrongTokenKind(TokenKind::Access))
        ));
    }

    #[test]
    fn foreign_issuer_or_audience_is_rejected() {
        let pair = JwtKeys::from_config(&config()).issue(Uuid::new_v4()).unwrap();

        let mut other = config();
        other.issuer = "other-issuer".into();
        let keys = JwtKeys::from_config(&other);
        assert!(matches!(
            keys.verify(&pair.access_token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));

        let mut other = config();
        other.audience = "other-aud".into();
        let keys = JwtKeys::from_config(&other);
        assert!(matches!(
            keys.verify(&pair.access_token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = JwtKeys::from_config(&config());
        let mut token = keys.issue(Uuid::new_v4()).unwrap().access_token;
        token.push('x');
        assert!(matches!(
            keys.verify(&token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }
}
