//! Page-shape classification.

use crate::document::Document;
use crate::selectors::{PRODUCT_BRIEF, PRODUCT_HEADING, WISHLIST_DESC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    SingleProduct,
    Wishlist,
    Listing,
}

impl PageKind {
    /// Whether elements without a product code get a visible marker.
    #[must_use]
    pub fn marks_missing_codes(self) -> bool {
        !matches!(self, PageKind::SingleProduct)
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageKind::SingleProduct => write!(f, "single-product"),
            PageKind::Wishlist => write!(f, "wishlist"),
            PageKind::Listing => write!(f, "listing"),
        }
    }
}

/// What the classifier needs to know about a page, captured once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub has_product_heading: bool,
    pub has_product_brief: bool,
    pub wishlist_items: usize,
}

impl PageSnapshot {
    #[must_use]
    pub fn capture(doc: &Document) -> Self {
        Self {
            has_product_heading: doc.exists(&PRODUCT_HEADING),
            has_product_brief: doc.exists(&PRODUCT_BRIEF),
            wishlist_items: doc.select(&WISHLIST_DESC).len(),
        }
    }
}

/// First match wins: product heading, then wishlist entries, else listing.
#[must_use]
pub fn classify(snapshot: &PageSnapshot) -> PageKind {
    if snapshot.has_product_heading {
        PageKind::SingleProduct
    } else if snapshot.wishlist_items > 0 {
        PageKind::Wishlist
    } else {
        PageKind::Listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_wins_over_wishlist() {
        let snapshot = PageSnapshot {
            has_product_heading: true,
            has_product_brief: false,
            wishlist_items: 3,
        };
        assert_eq!(classify(&snapshot), PageKind::SingleProduct);
    }

    #[test]
    fn wishlist_without_heading() {
        let snapshot = PageSnapshot {
            wishlist_items: 1,
            ..PageSnapshot::default()
        };
        assert_eq!(classify(&snapshot), PageKind::Wishlist);
    }

    #[test]
    fn empty_page_is_listing() {
        assert_eq!(classify(&PageSnapshot::default()), PageKind::Listing);
    }

    #[test]
    fn capture_reads_marketplace_markup() {
        let doc = Document::parse(
            r#"<h1 class="product-info__header_title dj_skin_product_title">Castle M1</h1>
               <p class="product-info__header_brief">brief</p>
               <p class="p-text-wish_desc">M2</p><p class="p-text-wish_desc">M3</p>"#,
        );
        let snapshot = PageSnapshot::capture(&doc);
        assert!(snapshot.has_product_heading);
        assert!(snapshot.has_product_brief);
        assert_eq!(snapshot.wishlist_items, 2);
    }

    #[test]
    fn heading_needs_both_classes() {
        let doc = Document::parse(r#"<h1 class="product-info__header_title">Castle M1</h1>"#);
        assert_eq!(
            classify(&PageSnapshot::capture(&doc)),
            PageKind::Listing
        );
    }

    #[test]
    fn only_enumeration_modes_mark_missing_codes() {
        assert!(!PageKind::SingleProduct.marks_missing_codes());
        assert!(PageKind::Wishlist.marks_missing_codes());
        assert!(PageKind::Listing.marks_missing_codes());
    }
}
