//! Local record cache keyed by product identifier.
//!
//! Entries never expire and are never evicted; a stale catalog name or image
//! stays in place until the store is cleared. Concurrent `get`/`put` pairs
//! for the same key are not coordinated: the last writer wins.

mod file;
mod memory;
mod noop;

use std::collections::BTreeMap;
use std::future::Future;

use brickswap_core::products::TAG_CHAR;
use brickswap_core::{CatalogRecord, ProductIdentifier};

use crate::error::CacheError;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use noop::NoopStore;

/// Asynchronous key-value store for catalog records.
pub trait RecordStore: Send + Sync {
    fn get(
        &self,
        key: &ProductIdentifier,
    ) -> impl Future<Output = Result<Option<CatalogRecord>, CacheError>> + Send;

    /// Stores `record`, replacing any previous entry for `key` wholesale.
    fn put(
        &self,
        key: &ProductIdentifier,
        record: &CatalogRecord,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// Diagnostic summary. Has no effect on lookups.
    fn metrics(&self) -> impl Future<Output = Result<CacheMetrics, CacheError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), CacheError>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Stored keys carrying the product tag prefix.
    pub item_count: usize,
    /// Size of the whole store serialized as JSON.
    pub approx_bytes: usize,
}

impl CacheMetrics {
    pub(crate) fn from_entries(
        entries: &BTreeMap<String, CatalogRecord>,
    ) -> Result<Self, CacheError> {
        let item_count = entries.keys().filter(|k| k.starts_with(TAG_CHAR)).count();
        let approx_bytes = serde_json::to_vec(entries)
            .map_err(|e| CacheError::Json {
                context: "cache metrics".to_string(),
                source: e,
            })?
            .len();
        Ok(Self {
            item_count,
            approx_bytes,
        })
    }
}

/// Store selected at startup from configuration.
pub enum StoreBackend {
    Memory(MemoryStore),
    File(FileStore),
    Noop(NoopStore),
}

impl StoreBackend {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory(_) => "memory",
            StoreBackend::File(_) => "file",
            StoreBackend::Noop(_) => "noop",
        }
    }
}

impl RecordStore for StoreBackend {
    async fn get(&self, key: &ProductIdentifier) -> Result<Option<CatalogRecord>, CacheError> {
        match self {
            StoreBackend::Memory(store) => store.get(key).await,
            StoreBackend::File(store) => store.get(key).await,
            StoreBackend::Noop(store) => store.get(key).await,
        }
    }

    async fn put(&self, key: &ProductIdentifier, record: &CatalogRecord) -> Result<(), CacheError> {
        match self {
            StoreBackend::Memory(store) => store.put(key, record).await,
            StoreBackend::File(store) => store.put(key, record).await,
            StoreBackend::Noop(store) => store.put(key, record).await,
        }
    }

    async fn metrics(&self) -> Result<CacheMetrics, CacheError> {
        match self {
            StoreBackend::Memory(store) => store.metrics().await,
            StoreBackend::File(store) => store.metrics().await,
            StoreBackend::Noop(store) => store.metrics().await,
        }
    }

    async fn clear(&self) -> Result<(), CacheError> {
        match self {
            StoreBackend::Memory(store) => store.clear().await,
            StoreBackend::File(store) => store.clear().await,
            StoreBackend::Noop(store) => store.clear().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_count_only_tagged_keys() {
        let mut entries = BTreeMap::new();
        entries.insert("M1".to_owned(), CatalogRecord::new("One", None));
        entries.insert("M22".to_owned(), CatalogRecord::new("Two", None));
        entries.insert("settings".to_owned(), CatalogRecord::new("x", None));

        let metrics = CacheMetrics::from_entries(&entries).unwrap();
        assert_eq!(metrics.item_count, 2);
        assert_eq!(
            metrics.approx_bytes,
            serde_json::to_vec(&entries).unwrap().len()
        );
    }

    #[test]
    fn metrics_for_empty_store() {
        let metrics = CacheMetrics::from_entries(&BTreeMap::new()).unwrap();
        assert_eq!(metrics.item_count, 0);
        assert_eq!(metrics.approx_bytes, 2);
    }

    #[tokio::test]
    async fn backend_delegates_to_memory_store() {
        let backend = StoreBackend::Memory(MemoryStore::new());
        let id = ProductIdentifier::parse("M17267").unwrap();
        backend
            .put(&id, &CatalogRecord::new("X", Some("Y".to_owned())))
            .await
            .unwrap();
        let got = backend.get(&id).await.unwrap().unwrap();
        assert_eq!(got.name, "X");
        assert_eq!(backend.name(), "memory");
    }
}
