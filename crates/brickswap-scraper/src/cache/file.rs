use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use brickswap_core::{CatalogRecord, ProductIdentifier};
use tokio::sync::Mutex;

use super::{CacheMetrics, RecordStore};
use crate::error::CacheError;

/// JSON object on disk mapping product identifiers to records.
///
/// The file is read once at [`FileStore::open`] and rewritten in full on
/// every `put` and `clear`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, CatalogRecord>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file exists but cannot be read, or
    /// [`CacheError::Json`] if it does not hold a JSON object of records.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| CacheError::Json {
                context: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(CacheError::Io { path, source: e }),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened cache file");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `entries` to a sibling temp file and renames it over the
    /// store, creating the parent directory if needed.
    async fn persist(&self, entries: &BTreeMap<String, CatalogRecord>) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| CacheError::Json {
            context: self.path.display().to_string(),
            source: e,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    async fn get(&self, key: &ProductIdentifier) -> Result<Option<CatalogRecord>, CacheError> {
        Ok(self.entries.lock().await.get(key.as_str()).cloned())
    }

    async fn put(&self, key: &ProductIdentifier, record: &CatalogRecord) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        // Memory only changes once the file write has succeeded.
        let mut next = entries.clone();
        next.insert(key.to_string(), record.clone());
        self.persist(&next).await?;
        *entries = next;
        tracing::debug!(product_id = %key, path = %self.path.display(), "cache entry written");
        Ok(())
    }

    async fn metrics(&self) -> Result<CacheMetrics, CacheError> {
        CacheMetrics::from_entries(&*self.entries.lock().await)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        self.persist(&BTreeMap::new()).await?;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(code: &str) -> ProductIdentifier {
        ProductIdentifier::parse(code).unwrap()
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("cache.json")).await.unwrap();
        assert!(store.get(&id("M1")).await.unwrap().is_none());
        assert_eq!(store.metrics().await.unwrap().item_count, 0);
    }

    #[tokio::test]
    async fn put_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let store = FileStore::open(&path).await.unwrap();
        store
            .put(
                &id("M17267"),
                &CatalogRecord::new("X", Some("Y".to_owned())),
            )
            .await
            .unwrap();
        drop(store);

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["M17267"]["name"], "X");
        assert_eq!(raw["M17267"]["imageUrl"], "Y");

        let reopened = FileStore::open(&path).await.unwrap();
        let got = reopened.get(&id("M17267")).await.unwrap().unwrap();
        assert_eq!(got, CatalogRecord::new("X", Some("Y".to_owned())));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, CacheError::Json { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn clear_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = FileStore::open(&path).await.unwrap();
        store
            .put(&id("M1"), &CatalogRecord::new("One", None))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert!(store.get(&id("M1")).await.unwrap().is_none());
        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.metrics().await.unwrap().item_count, 0);
    }

    #[tokio::test]
    async fn failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("sub");
        let store = FileStore::open(parent.join("cache.json")).await.unwrap();
        store
            .put(&id("M1"), &CatalogRecord::new("One", None))
            .await
            .unwrap();

        // A plain file where the cache directory should be.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "blocking").unwrap();

        let err = store
            .put(&id("M2"), &CatalogRecord::new("Two", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }), "got: {err:?}");
        assert!(store.get(&id("M2")).await.unwrap().is_none());
        assert!(store.get(&id("M1")).await.unwrap().is_some());
        assert_eq!(store.path(), parent.join("cache.json"));
    }
}
