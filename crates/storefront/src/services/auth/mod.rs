//! Authentication service.
//!
//! The shop has no account model: a single configured username/password
//! pair unlocks the "logged in" session flag. Verification sits behind
//! [`CredentialVerifier`] so the check is not baked into the login handler
//! and can be swapped for a real user store.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use crate::config::LoginConfig;

/// Checks a username/password pair.
pub trait CredentialVerifier: Send + Sync {
    /// Verify credentials, returning the canonical username on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair is not accepted.
    fn verify(&self, username: &str, password: &str) -> Result<String, AuthError>;
}

/// Accepts exactly one configured credential pair.
pub struct StaticCredentials {
    username: String,
    password: SecretString,
}

impl StaticCredentials {
    /// Create a verifier accepting `username`/`password`.
    #[must_use]
    pub const fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }
}

impl From<&LoginConfig> for StaticCredentials {
    fn from(config: &LoginConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username == self.username && password == self.password.expose_secret() {
            Ok(self.username.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
