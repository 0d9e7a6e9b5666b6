//! Rebrickable API response types.
//!
//! Only the fields the rewriter consumes are modelled; everything else in the
//! payload (`set_num`, `year`, `num_parts`, ...) is ignored.

use brickswap_core::CatalogRecord;
use serde::Deserialize;

/// Body of `GET /lego/sets/{set_num}/`.
#[derive(Debug, Default, Deserialize)]
pub struct SetResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub set_img_url: Option<String>,
}

impl SetResponse {
    /// Converts the payload into a record, or `None` when the name is
    /// missing or blank.
    ///
    /// The name is trimmed; an empty image URL counts as absent.
    #[must_use]
    pub fn into_record(self) -> Option<CatalogRecord> {
        let name = self.name?.trim().to_owned();
        if name.is_empty() {
            return None;
        }
        let image_url = self.set_img_url.filter(|url| !url.trim().is_empty());
        Some(CatalogRecord::new(name, image_url))
    }
}
