//! Session middleware configuration.
//!
//! Sessions are held in-process in a `moka` cache and addressed by a signed
//! cookie. Each record expires from the cache at its own expiry date, so
//! abandoned carts do not accumulate. Handlers only see the `Session`
//! extractor, so swapping in another `SessionStore` touches nothing but this
//! module.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::Router;
use moka::Expiry as CacheExpiry;
use moka::future::Cache;
use secrecy::ExposeSecret;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::session::{Id, Record};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bazar_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on live sessions held in memory.
const MAX_SESSIONS: u64 = 100_000;

/// In-memory session store that drops records once they expire.
#[derive(Clone)]
pub struct CacheSessionStore {
    cache: Cache<Id, Record>,
}

impl CacheSessionStore {
    /// Create a store holding at most `max_sessions` records.
    #[must_use]
    pub fn new(max_sessions: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .expire_after(RecordExpiry)
            .build();
        Self { cache }
    }

    /// Number of records currently held, including any not yet evicted.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions now instead of on the next cache access.
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for CacheSessionStore {
    fn default() -> Self {
        Self::new(MAX_SESSIONS)
    }
}

impl fmt::Debug for CacheSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSessionStore")
            .field("records", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Expires each cache entry at its record's expiry date.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        Duration::try_from(record.expiry_date - OffsetDateTime::now_utc())
            .unwrap_or(Duration::ZERO)
    }
}

impl CacheExpiry<Id, Record> for RecordExpiry {
    fn expire_after_create(
        &self,
        _id: &Id,
        record: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }
}

/// Wrap `router` in the session layer.
///
/// # Arguments
///
/// * `router` - Router to wrap
/// * `config` - Storefront configuration (for session secret and cookie flags)
pub fn with_sessions<S>(router: Router<S>, config: &StorefrontConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let layer = SessionManagerLayer::new(CacheSessionStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config));

    router.layer(layer)
}

/// Derive the cookie signing key from configuration.
///
/// Without a configured secret a random key is used, so sessions are lost
/// on restart.
fn signing_key(config: &StorefrontConfig) -> Key {
    let configured = config
        .session_secret
        .as_ref()
        .and_then(|secret| Key::try_from(secret.expose_secret().as_bytes()).ok());

    configured.unwrap_or_else(|| {
        tracing::warn!(
            "STOREFRONT_SESSION_SECRET not set; using a random session key (sessions reset on restart)"
        );
        Key::generate()
    })
}
