//! Cache-then-catalog resolution of product identifiers.

use brickswap_catalog::{CatalogClient, CatalogError};
use brickswap_core::{CatalogRecord, ProductIdentifier};

use crate::cache::RecordStore;

/// How a lookup ended. Failures are logged where they happen; callers only
/// need to know whether a record is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cached(CatalogRecord),
    Fetched(CatalogRecord),
    /// The catalog answered but had no usable name.
    NoData,
    /// HTTP error status, network failure, or unreadable body.
    Failed,
}

impl Resolution {
    #[must_use]
    pub fn record(&self) -> Option<&CatalogRecord> {
        match self {
            Resolution::Cached(record) | Resolution::Fetched(record) => Some(record),
            Resolution::NoData | Resolution::Failed => None,
        }
    }
}

pub struct Resolver<S> {
    catalog: CatalogClient,
    store: S,
}

impl<S: RecordStore> Resolver<S> {
    pub fn new(catalog: CatalogClient, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the cached record for `id`, or fetches and caches it.
    ///
    /// Cache errors degrade to a miss (on read) or are ignored (on write).
    /// Only successful catalog lookups with a name are cached.
    pub async fn resolve(&self, id: &ProductIdentifier) -> Resolution {
        if tracing::enabled!(tracing::Level::DEBUG) {
            self.log_metrics().await;
        }

        match self.store.get(id).await {
            Ok(Some(record)) => {
                tracing::debug!(product_id = %id, name = %record.name, "cache hit");
                return Resolution::Cached(record);
            }
            Ok(None) => tracing::debug!(product_id = %id, "cache miss"),
            Err(e) => tracing::warn!(product_id = %id, error = %e, "cache read failed; treating as miss"),
        }

        let key = id.lookup_key();
        match self.catalog.fetch_set(&key).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    product_id = %id,
                    name = %record.name,
                    image_url = record.image_url.as_deref().unwrap_or(""),
                    "catalog record found"
                );
                if let Err(e) = self.store.put(id, &record).await {
                    tracing::warn!(product_id = %id, error = %e, "cache write failed");
                }
                Resolution::Fetched(record)
            }
            Ok(None) => {
                tracing::info!(product_id = %id, lookup_key = %key, "catalog entry has no name");
                Resolution::NoData
            }
            Err(CatalogError::NotFound { url }) => {
                tracing::info!(product_id = %id, url = %url, "no catalog entry for product");
                Resolution::Failed
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "catalog lookup failed");
                Resolution::Failed
            }
        }
    }

    async fn log_metrics(&self) {
        match self.store.metrics().await {
            Ok(metrics) => tracing::debug!(
                items = metrics.item_count,
                bytes = metrics.approx_bytes,
                "cache metrics"
            ),
            Err(e) => tracing::debug!(error = %e, "cache metrics unavailable"),
        }
    }
}
