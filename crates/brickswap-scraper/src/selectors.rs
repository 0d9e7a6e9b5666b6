//! CSS selectors for the marketplace's page markup.

use std::sync::LazyLock;

use scraper::Selector;

/// Parses a selector known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

pub(crate) static PRODUCT_HEADING: LazyLock<Selector> =
    LazyLock::new(|| selector("h1.product-info__header_title.dj_skin_product_title"));
pub(crate) static PRODUCT_BRIEF: LazyLock<Selector> =
    LazyLock::new(|| selector("p.product-info__header_brief"));
pub(crate) static LISTING_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector("a.product-snippet__title-normal"));
pub(crate) static WISHLIST_DESC: LazyLock<Selector> =
    LazyLock::new(|| selector("p.p-text-wish_desc"));
pub(crate) static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
