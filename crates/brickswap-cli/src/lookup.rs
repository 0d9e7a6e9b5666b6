//! The `lookup` command: resolve a single product code.

use brickswap_core::{AppConfig, ProductIdentifier};
use brickswap_scraper::{extract_from_href, extract_from_text, Resolution, Resolver};

/// Accepts `M17267`, `m17267`, bare digits, or a product URL.
pub(crate) fn parse_code(raw: &str) -> anyhow::Result<ProductIdentifier> {
    let raw = raw.trim();
    extract_from_href(raw)
        .or_else(|| extract_from_text(raw))
        .or_else(|| ProductIdentifier::parse(raw).ok())
        .or_else(|| ProductIdentifier::from_digits(raw).ok())
        .ok_or_else(|| anyhow::anyhow!("'{raw}' does not contain a product code"))
}

/// Resolves `code` through the cache and catalog and prints the record as
/// JSON.
///
/// # Errors
///
/// Returns an error if the code is unparseable, the API key is missing, or
/// the catalog has no usable record for it.
pub(crate) async fn run_lookup(config: &AppConfig, code: &str, no_cache: bool) -> anyhow::Result<()> {
    let id = parse_code(code)?;
    let client = crate::build_catalog_client(config)?;
    let store = crate::cache::open_store(config, !no_cache).await;
    let resolver = Resolver::new(client, store);

    let resolution = resolver.resolve(&id).await;
    let source = match &resolution {
        Resolution::Cached(_) => "cache",
        Resolution::Fetched(_) => "catalog",
        Resolution::NoData | Resolution::Failed => "",
    };
    let Some(record) = resolution.record() else {
        anyhow::bail!("no catalog record for {id} (lookup key {})", id.lookup_key());
    };

    let out = serde_json::json!({
        "productId": id,
        "lookupKey": id.lookup_key().as_str(),
        "name": record.name,
        "imageUrl": record.image_url,
        "source": source,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
