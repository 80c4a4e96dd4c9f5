//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::config::StorefrontConfig;
use crate::services::{CredentialVerifier, StaticCredentials};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the catalog and the login gate.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogSource,
    credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is read from the configured static directory and the
    /// login gate accepts the configured credential pair.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let credentials = Arc::new(StaticCredentials::from(&config.login));
        Self::with_credentials(config, credentials)
    }

    /// Create application state with a custom credential verifier.
    #[must_use]
    pub fn with_credentials(
        config: StorefrontConfig,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let catalog = CatalogSource::with_cache_ttl(config.data_dir(), config.catalog_cache_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                credentials,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog source.
    #[must_use]
    pub fn catalog(&self) -> &CatalogSource {
        &self.inner.catalog
    }

    /// Get a reference to the login credential verifier.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialVerifier {
        self.inner.credentials.as_ref()
    }
}
