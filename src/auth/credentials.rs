//! Fixed admin credential check.
//!
//! The comparison is plain string equality: no hashing, no constant-time
//! compare, no lockout. Callers must not rely on it resisting timing or
//! brute-force attacks.

use super::{AuthError, SessionClaims};
use zeroize::Zeroizing;

/// The single admin username/password pair, loaded once at startup.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Check a submitted username/password.
    ///
    /// Input is compared exactly as submitted: no trimming, no case folding.
    /// On success the username becomes the identity embedded in the session token.
    /// Unknown user and wrong password produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<SessionClaims, AuthError> {
        if username == self.username && password == self.password.as_str() {
            Ok(SessionClaims {
                username: username.to_string(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
