use brickswap_core::{CatalogRecord, ProductIdentifier};

use super::{CacheMetrics, RecordStore};
use crate::error::CacheError;

/// Store for environments without persistent storage: always misses,
/// discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl RecordStore for NoopStore {
    async fn get(&self, _key: &ProductIdentifier) -> Result<Option<CatalogRecord>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &ProductIdentifier, _record: &CatalogRecord) -> Result<(), CacheError> {
        Ok(())
    }

    async fn metrics(&self) -> Result<CacheMetrics, CacheError> {
        Ok(CacheMetrics::default())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
