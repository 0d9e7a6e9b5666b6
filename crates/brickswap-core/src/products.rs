use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Leading tag character of a marketplace product code.
pub const TAG_CHAR: char = 'M';

/// Marketplace product code in canonical form: `M` followed by one or more
/// ASCII digits, uppercase.
///
/// Leading zeros are kept and the digit count is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductIdentifier(String);

impl ProductIdentifier {
    /// Parses a product code, accepting a lowercase tag character.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] unless the input is a tag
    /// character followed by at least one ASCII digit.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.strip_prefix(TAG_CHAR) {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(Self(upper))
            }
            _ => Err(CoreError::InvalidIdentifier(raw.to_owned())),
        }
    }

    /// Builds an identifier by prefixing the tag character to a digit run.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] if `digits` is empty or holds
    /// anything other than ASCII digits.
    pub fn from_digits(digits: &str) -> Result<Self, CoreError> {
        Self::parse(&format!("{TAG_CHAR}{digits}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digit run after the tag character.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0[TAG_CHAR.len_utf8()..]
    }

    /// Derives the catalog's key for this product: the digits reversed.
    #[must_use]
    pub fn lookup_key(&self) -> CatalogLookupKey {
        CatalogLookupKey(self.digits().chars().rev().collect())
    }
}

impl std::fmt::Display for ProductIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductIdentifier {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductIdentifier> for String {
    fn from(value: ProductIdentifier) -> Self {
        value.0
    }
}

/// Request-path parameter for the catalog API. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLookupKey(String);

impl CatalogLookupKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogLookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display data resolved for a product from the catalog.
///
/// Serialized as `{"name": ..., "imageUrl": ...}`, the layout the cache file
/// uses on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CatalogRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_url,
        }
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
