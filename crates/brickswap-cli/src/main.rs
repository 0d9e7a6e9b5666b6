mod cache;
mod lookup;
mod rewrite;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cache::CacheCommands;

#[derive(Debug, Parser)]
#[command(name = "brickswap")]
#[command(about = "Rewrite marketplace pages with catalog set names and images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite product titles and images in a saved marketplace page
    Rewrite {
        /// HTML file to read
        #[arg(long, short)]
        input: PathBuf,
        /// Where to write the rewritten page (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Bypass the local record cache for this run
        #[arg(long)]
        no_cache: bool,
    },
    /// Resolve one product code (e.g. M17267) and print its catalog record
    Lookup {
        /// Product code, bare digits, or a product URL
        code: String,
        /// Bypass the local record cache for this run
        #[arg(long)]
        no_cache: bool,
    },
    /// Inspect or reset the local record cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = brickswap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_log_filter()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(config = ?config, "configuration loaded");

    match cli.command {
        Commands::Rewrite {
            input,
            output,
            no_cache,
        } => rewrite::run_rewrite(&config, &input, output.as_deref(), no_cache).await?,
        Commands::Lookup { code, no_cache } => {
            lookup::run_lookup(&config, &code, no_cache).await?;
        }
        Commands::Cache { command } => cache::run_cache(&config, command).await?,
    }

    Ok(())
}

/// Builds the catalog client from configuration.
///
/// # Errors
///
/// Returns an error if the API key is missing or the client cannot be built.
pub(crate) fn build_catalog_client(
    config: &brickswap_core::AppConfig,
) -> anyhow::Result<brickswap_catalog::CatalogClient> {
    let api_key = config.require_api_key()?;
    brickswap_catalog::CatalogClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.catalog_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}
