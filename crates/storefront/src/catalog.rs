//! Catalog loading.
//!
//! Products and navigation categories live in two JSON files under
//! `<static_dir>/assets/data/`. By default both are re-read on every call so
//! edits show up without a restart. An optional `moka` cache can be enabled
//! through configuration; it must be invalidated explicitly (or expire) after
//! the files change.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bazar_core::{Category, Product};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

/// Product list file name.
pub const PRODUCTS_FILE: &str = "products.json";

/// Category list file name.
pub const CATEGORIES_FILE: &str = "categories.json";

/// Errors reading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Cache key for catalog files.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Categories(Arc<Vec<Category>>),
}

/// Reads catalog files from disk.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct CatalogSource {
    inner: Arc<CatalogSourceInner>,
}

struct CatalogSourceInner {
    data_dir: PathBuf,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl CatalogSource {
    /// Create a source reading `data_dir` on every call.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_cache_ttl(data_dir, None)
    }

    /// Create a source that caches parsed files for `ttl`.
    ///
    /// `None` disables caching.
    #[must_use]
    pub fn with_cache_ttl(data_dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        let cache = ttl.map(|ttl| Cache::builder().max_capacity(2).time_to_live(ttl).build());

        Self {
            inner: Arc::new(CatalogSourceInner {
                data_dir: data_dir.into(),
                cache,
            }),
        }
    }

    /// Directory the catalog files are read from.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// Load the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.cached(CacheKey::Products).await {
            return Ok(products.as_ref().clone());
        }

        let products: Vec<Product> = self.read_json(PRODUCTS_FILE).await?;
        debug!(count = products.len(), "Loaded products");
        self.store(CacheKey::Products, CacheValue::Products(Arc::new(products.clone())))
            .await;
        Ok(products)
    }

    /// Load the navigation categories, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) = self.cached(CacheKey::Categories).await {
            return Ok(categories.as_ref().clone());
        }

        let categories: Vec<Category> = self.read_json(CATEGORIES_FILE).await?;
        self.store(
            CacheKey::Categories,
            CacheValue::Categories(Arc::new(categories.clone())),
        )
        .await;
        Ok(categories)
    }

    /// Drop all cached catalog data.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }

    async fn cached(&self, key: CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(&key).await,
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, CatalogError> {
        let path = self.inner.data_dir.join(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse { path, source })
    }
}
