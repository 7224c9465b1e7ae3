//! HS256 session tokens.
//!
//! A token is a compact JWT carrying the session claims plus `iat` and `exp`.
//! Expiry is enforced here against an explicit clock rather than by the JWT
//! library, so `verify_at` can be driven from tests.

use super::{AuthError, SessionClaims};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Lifetime of a session token and of the cookie that carries it.
pub const SESSION_TTL_SECS: u64 = 3600;

/// Wire form of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    #[serde(flatten)]
    session: SessionClaims,
    iat: u64,
    exp: u64,
}

/// Key material for signing and verifying session tokens.
///
/// Built once from the process-wide secret; the same key signs and verifies.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is checked in verify_at against the caller's clock
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `claims`, issued now.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        self.issue_at(claims, now_secs())
    }

    /// Sign a token for `claims` with the given issue time (unix seconds).
    pub fn issue_at(&self, claims: &SessionClaims, issued_at: u64) -> Result<String, AuthError> {
        let payload = TokenClaims {
            session: claims.clone(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a presented token against the current time.
    pub fn verify(&self, token: Option<&str>) -> Result<SessionClaims, AuthError> {
        self.verify_at(token, now_secs())
    }

    /// Verify a presented token as of `now` (unix seconds).
    ///
    /// A token is valid only while `now < exp`.
    pub fn verify_at(&self, token: Option<&str>, now: u64) -> Result<SessionClaims, AuthError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::TokenMissing),
        };

        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

        if now >= data.claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims.session)
    }
}

/// Current unix time in seconds.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
