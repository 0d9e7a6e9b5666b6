//! Title and image rewriting for a resolved catalog record.

use brickswap_core::CatalogRecord;
use scraper::Selector;

use crate::document::{Document, ElementHandle};
use crate::selectors::{selector, IMG};

/// Catalog names containing any of these denote generic part bundles rather
/// than named sets. Matched case-sensitively as plain substrings.
pub const BLOCKED_NAME_FRAGMENTS: [&str; 4] = ["Plates", "Beams", "Bricks", "Miscellaneous"];

/// Widths advertised in the rewritten `srcset`; every width points at the
/// same catalog image.
pub const SRCSET_WIDTHS: [u32; 4] = [360, 540, 720, 1024];

/// One step of the image search. Rules are tried in order and the first
/// rule that matches decides, even if it yields no image.
#[derive(Debug, Clone)]
pub enum ImageRule {
    /// Nearest ancestor-or-self matching `container`, then its first `img`.
    Ancestor { container: Selector },
    /// First element anywhere in the document matching `image`. Matches
    /// only when such an element exists.
    Document { image: Selector },
}

impl ImageRule {
    /// # Panics
    ///
    /// Panics if `css` is not a valid selector. Rules are built from
    /// literals.
    #[must_use]
    pub fn ancestor(css: &str) -> Self {
        Self::Ancestor {
            container: selector(css),
        }
    }

    /// # Panics
    ///
    /// Panics if `css` is not a valid selector.
    #[must_use]
    pub fn document(css: &str) -> Self {
        Self::Document {
            image: selector(css),
        }
    }
}

/// Result of [`Rewriter::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The name hit the block-list; nothing was written.
    Rejected,
    /// Title written; no image target or no image URL.
    TitleOnly,
    TitleAndImage,
}

#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<ImageRule>,
    blocked: Vec<String>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self {
            rules: vec![
                ImageRule::ancestor(".product-image"),
                ImageRule::ancestor(".product-snippet"),
                ImageRule::document(".product-image__content img"),
                ImageRule::ancestor(".p-cursor-pointer"),
            ],
            blocked: BLOCKED_NAME_FRAGMENTS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Rewriter {
    /// Builds a rewriter with a custom image rule list and the default
    /// block-list.
    #[must_use]
    pub fn with_rules(rules: Vec<ImageRule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Returns the first block-listed fragment contained in `name`.
    #[must_use]
    pub fn blocked_fragment(&self, name: &str) -> Option<&str> {
        self.blocked
            .iter()
            .find(|fragment| name.contains(fragment.as_str()))
            .map(String::as_str)
    }

    /// Writes `record` onto `target` and its associated image.
    pub fn apply(
        &self,
        doc: &mut Document,
        target: ElementHandle,
        record: &CatalogRecord,
    ) -> RewriteOutcome {
        if let Some(fragment) = self.blocked_fragment(&record.name) {
            tracing::info!(
                name = %record.name,
                fragment,
                "catalog name looks like a parts bundle; leaving title unchanged"
            );
            return RewriteOutcome::Rejected;
        }

        doc.set_text(target, record.name.as_str());
        tracing::debug!(name = %record.name, "updated product title");

        // An image inside the title is replaced along with the text.
        let image = self
            .locate_image(doc, target)
            .filter(|image| !doc.is_inside(*image, target));
        match (image, record.image_url.as_deref()) {
            (Some(image), Some(url)) => {
                doc.set_attr(image, "src", url);
                doc.set_attr(image, "srcset", srcset(url));
                doc.set_attr(image, "alt", record.name.as_str());
                tracing::debug!(image_url = url, "updated product image");
                RewriteOutcome::TitleAndImage
            }
            (None, _) => {
                tracing::debug!(name = %record.name, "no image element found for product");
                RewriteOutcome::TitleOnly
            }
            (Some(_), None) => {
                tracing::debug!(name = %record.name, "catalog record has no image URL");
                RewriteOutcome::TitleOnly
            }
        }
    }

    /// Walks the rule list; the first matching rule decides.
    #[must_use]
    pub fn locate_image(&self, doc: &Document, target: ElementHandle) -> Option<ElementHandle> {
        for rule in &self.rules {
            match rule {
                ImageRule::Ancestor { container } => {
                    if let Some(found) = doc.closest(target, container) {
                        return doc.select_within(found, &IMG);
                    }
                }
                ImageRule::Document { image } => {
                    if let Some(found) = doc.select_first(image) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }
}

/// `"{url} 360w, {url} 540w, {url} 720w, {url} 1024w"`.
#[must_use]
pub fn srcset(url: &str) -> String {
    SRCSET_WIDTHS
        .iter()
        .map(|w| format!("{url} {w}w"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
