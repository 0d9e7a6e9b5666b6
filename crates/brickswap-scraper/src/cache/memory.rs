use std::collections::BTreeMap;

use brickswap_core::{CatalogRecord, ProductIdentifier};
use tokio::sync::RwLock;

use super::{CacheMetrics, RecordStore};
use crate::error::CacheError;

/// In-process store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, CatalogRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. from a snapshot taken elsewhere.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (ProductIdentifier, CatalogRecord)>) -> Self {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(id, record)| (id.to_string(), record))
                    .collect(),
            ),
        }
    }
}

impl RecordStore for MemoryStore {
    async fn get(&self, key: &ProductIdentifier) -> Result<Option<CatalogRecord>, CacheError> {
        Ok(self.entries.read().await.get(key.as_str()).cloned())
    }

    async fn put(&self, key: &ProductIdentifier, record: &CatalogRecord) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn metrics(&self) -> Result<CacheMetrics, CacheError> {
        CacheMetrics::from_entries(&*self.entries.read().await)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
