//! The `cache` command and cache backend selection.

use clap::Subcommand;

use brickswap_core::AppConfig;
use brickswap_scraper::{CacheError, FileStore, NoopStore, RecordStore, StoreBackend};

/// Sub-commands available under `cache`.
#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Show the number of cached records and the store size
    Stats,
    /// Remove every cached record
    Clear,
}

/// Picks the record store for a run.
///
/// The file store is used unless caching is disabled in configuration or by
/// `enabled = false`. A cache file that cannot be opened degrades to no
/// caching rather than failing the run.
pub(crate) async fn open_store(config: &AppConfig, enabled: bool) -> StoreBackend {
    if !enabled || !config.cache_enabled {
        tracing::info!("record cache disabled");
        return StoreBackend::Noop(NoopStore);
    }

    match FileStore::open(config.cache_path.clone()).await {
        Ok(store) => StoreBackend::File(store),
        Err(e) => {
            tracing::warn!(
                path = %config.cache_path.display(),
                error = %e,
                "record cache unavailable; continuing without it"
            );
            StoreBackend::Noop(NoopStore)
        }
    }
}

/// Runs a `cache` sub-command against the configured cache file.
///
/// # Errors
///
/// Returns an error if the cache file cannot be read or written. `clear`
/// also recovers a file that no longer holds valid JSON by deleting it.
pub(crate) async fn run_cache(config: &AppConfig, command: CacheCommands) -> anyhow::Result<()> {
    let path = &config.cache_path;
    match command {
        CacheCommands::Stats => {
            let store = FileStore::open(path.clone()).await?;
            let metrics = store.metrics().await?;
            println!("cache file: {}", store.path().display());
            println!("records:    {}", metrics.item_count);
            println!("size:       {} bytes", metrics.approx_bytes);
        }
        CacheCommands::Clear => match FileStore::open(path.clone()).await {
            Ok(store) => {
                store.clear().await?;
                println!("cleared {}", store.path().display());
            }
            Err(CacheError::Json { .. }) => {
                tracing::warn!(path = %path.display(), "cache file is corrupt; removing it");
                tokio::fs::remove_file(path)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to remove {}: {e}", path.display()))?;
                println!("removed {}", path.display());
            }
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
