//! Product-code extraction from page text and listing links.

use std::sync::LazyLock;

use brickswap_core::ProductIdentifier;
use regex::Regex;

static TEXT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"M[0-9]+").expect("valid text code regex"));
static HREF_TAGGED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/products/m([0-9]+)").expect("valid tagged href regex"));
static HREF_BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/products/([0-9]+)").expect("valid bare href regex"));

/// Returns the first `M<digits>` run in `text`. Only ASCII digits count.
///
/// The tag character must be an uppercase `M`; `"m123"` in running text is
/// not a product code.
#[must_use]
pub fn extract_from_text(text: &str) -> Option<ProductIdentifier> {
    let found = TEXT_CODE_RE.find(text)?;
    ProductIdentifier::parse(found.as_str()).ok()
}

/// Returns the product code carried by a listing link.
///
/// `/products/m<digits>` is preferred; `/products/<digits>` is accepted and
/// the tag character synthesized.
#[must_use]
pub fn extract_from_href(href: &str) -> Option<ProductIdentifier> {
    let digits = HREF_TAGGED_RE
        .captures(href)
        .or_else(|| HREF_BARE_RE.captures(href))
        .and_then(|caps| caps.get(1))?;
    ProductIdentifier::from_digits(digits.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(id: Option<ProductIdentifier>) -> Option<String> {
        id.map(|id| id.as_str().to_owned())
    }

    #[test]
    fn text_code_found_in_title() {
        assert_eq!(
            code(extract_from_text("Building Blocks Castle M17267 (1200 pcs)")),
            Some("M17267".to_owned())
        );
    }

    #[test]
    fn text_code_first_match_wins() {
        assert_eq!(
            code(extract_from_text("M1 and M2")),
            Some("M1".to_owned())
        );
    }

    #[test]
    fn text_code_keeps_leading_zeros() {
        assert_eq!(
            code(extract_from_text("item M000123")),
            Some("M000123".to_owned())
        );
    }

    #[test]
    fn text_code_requires_uppercase_tag() {
        assert!(extract_from_text("model m17267").is_none());
    }

    #[test]
    fn text_code_skips_fullwidth_digits() {
        assert_eq!(
            code(extract_from_text("Set M\u{FF11}\u{FF12} M17267")),
            Some("M17267".to_owned())
        );
    }

    #[test]
    fn text_code_absent() {
        assert!(extract_from_text("Mega set with no code").is_none());
        assert!(extract_from_text("").is_none());
    }

    #[test]
    fn href_tagged_code() {
        assert_eq!(
            code(extract_from_href("https://shop.example/products/m10294?variant=1")),
            Some("M10294".to_owned())
        );
    }

    #[test]
    fn href_tagged_code_uppercase_path() {
        assert_eq!(
            code(extract_from_href("/products/M42115")),
            Some("M42115".to_owned())
        );
    }

    #[test]
    fn href_bare_digits_get_tag() {
        assert_eq!(
            code(extract_from_href("https://shop.example/products/75192-falcon")),
            Some("M75192".to_owned())
        );
    }

    #[test]
    fn href_fullwidth_digits_are_not_a_code() {
        assert!(extract_from_href("/products/m\u{FF11}\u{FF12}").is_none());
        assert_eq!(
            code(extract_from_href("/products/m\u{FF11}/products/17267")),
            Some("M17267".to_owned())
        );
    }

    #[test]
    fn href_without_product_path() {
        assert!(extract_from_href("https://shop.example/collections/m123").is_none());
        assert!(extract_from_href("/products/falcon").is_none());
    }
}
