//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password not accepted.
    #[error("invalid credentials")]
    InvalidCredentials,
}
