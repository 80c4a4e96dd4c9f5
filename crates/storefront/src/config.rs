//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run the demo shop locally.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   An `https://` URL marks the session cookie `Secure`.
//! - `STOREFRONT_STATIC_DIR` - Static asset root; catalog files live under
//!   `assets/data/` (default: crates/storefront/static)
//! - `STOREFRONT_SESSION_SECRET` - Session cookie signing secret (min 64 chars).
//!   When unset, a random key is generated and sessions do not survive restarts.
//! - `STOREFRONT_LOGIN_USER` - Login gate username (default: admin)
//! - `STOREFRONT_LOGIN_PASSWORD` - Login gate password (default: 1234)
//! - `STOREFRONT_CATALOG_CACHE_TTL_SECS` - Cache catalog files for this many
//!   seconds; 0 re-reads them on every request (default: 0)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum session secret length; the cookie signing key is 64 bytes.
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;

const DEFAULT_LOGIN_USER: &str = "admin";
const DEFAULT_LOGIN_PASSWORD: &str = "1234";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Static asset root (served under `/static`)
    pub static_dir: PathBuf,
    /// Session signing secret, if configured
    pub session_secret: Option<SecretString>,
    /// Login gate credentials
    pub login: LoginConfig,
    /// Catalog cache lifetime; `None` disables caching
    pub catalog_cache_ttl: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Credentials accepted by the login gate.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct LoginConfig {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for LoginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_LOGIN_USER.to_string(),
            password: SecretString::from(DEFAULT_LOGIN_PASSWORD),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value or the
    /// session secret is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));

        let session_secret = get_optional_env("STOREFRONT_SESSION_SECRET").map(SecretString::from);
        if let Some(secret) = &session_secret {
            validate_session_secret(secret, "STOREFRONT_SESSION_SECRET")?;
        }

        let login = LoginConfig {
            username: get_env_or_default("STOREFRONT_LOGIN_USER", DEFAULT_LOGIN_USER),
            password: SecretString::from(get_env_or_default(
                "STOREFRONT_LOGIN_PASSWORD",
                DEFAULT_LOGIN_PASSWORD,
            )),
        };

        let ttl_secs: u64 = parse_env("STOREFRONT_CATALOG_CACHE_TTL_SECS", "0")?;
        let catalog_cache_ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            session_secret,
            login,
            catalog_cache_ttl,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Local defaults with catalog data read from `static_dir`.
    #[must_use]
    pub fn local(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: static_dir.into(),
            session_secret: None,
            login: LoginConfig::default(),
            catalog_cache_ttl: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Directory holding `products.json` and `categories.json`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.static_dir.join("assets").join("data")
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}
