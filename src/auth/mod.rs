//! Admin session authentication: credential check, token issuance, and the route gate.

pub mod cookie;
pub mod credentials;
pub mod middleware;
pub mod token;

pub use cookie::{read_cookie, session_cookie, SESSION_COOKIE};
pub use credentials::Credentials;
pub use middleware::{admin_gate, is_protected_path, AppState, LOGIN_PATH, PROTECTED_PREFIX};
pub use token::{SessionKeys, SESSION_TTL_SECS};

use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Identity carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session token missing")]
    TokenMissing,

    #[error("Session token invalid: {0}")]
    TokenInvalid(String),

    #[error("Session token expired")]
    TokenExpired,

    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

/// Stateless authenticator shared by the login handler and the gate.
///
/// Holds only read-only material loaded at startup.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Credentials,
    keys: SessionKeys,
}

impl Authenticator {
    pub fn new(credentials: Credentials, keys: SessionKeys) -> Self {
        Self { credentials, keys }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Credentials::new(
                config.admin_username.clone(),
                config.admin_password.as_str(),
            ),
            SessionKeys::new(config.jwt_secret.as_bytes()),
        )
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<SessionClaims, AuthError> {
        self.credentials.authenticate(username, password)
    }

    pub fn issue_token(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        self.keys.issue(claims)
    }

    pub fn verify_token(&self, token: Option<&str>) -> Result<SessionClaims, AuthError> {
        self.keys.verify(token)
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }
}
