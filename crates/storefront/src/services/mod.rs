//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Login gate credential verification

pub mod auth;

pub use auth::{AuthError, CredentialVerifier, StaticCredentials};
