//! The `rewrite` command: one pass over a saved page.

use std::io::Write;
use std::path::Path;

use brickswap_core::AppConfig;
use brickswap_scraper::{run_pass, Document, Resolver, Rewriter};

/// Reads `input`, runs a rewrite pass and writes the result to `output`
/// (or stdout).
///
/// Progress lines go to stderr so stdout carries only the page.
///
/// # Errors
///
/// Returns an error if the API key is missing, the input cannot be read, or
/// the output cannot be written. Per-element lookup failures are logged and
/// leave that element unchanged.
pub(crate) async fn run_rewrite(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    no_cache: bool,
) -> anyhow::Result<()> {
    let client = crate::build_catalog_client(config)?;
    let source = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;

    let store = crate::cache::open_store(config, !no_cache).await;
    tracing::debug!(backend = store.name(), "record cache selected");
    let resolver = Resolver::new(client, store);

    eprintln!("Status: Updating...");
    let mut doc = Document::parse(&source);
    let report = run_pass(&mut doc, &resolver, &Rewriter::default()).await;
    eprintln!("Status: Update complete!");
    eprintln!("{report}");

    let html = doc.render();
    match output {
        Some(path) => tokio::fs::write(path, html)
            .await
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?,
        None => std::io::stdout().lock().write_all(html.as_bytes())?,
    }

    Ok(())
}
