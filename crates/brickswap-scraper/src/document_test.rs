use super::*;
use crate::selectors::selector;

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Shop</title><script>if (a < b) { go(); }</script></head>
<body>
<!-- listing -->
<div class="product-snippet">
  <img src="/old.jpg" alt="old">
  <a class="product-snippet__title-normal" href="/products/m17267">Castle &amp; Keep <b>M17267</b></a>
</div>
<p class="note">plain</p>
</body></html>"#;

#[test]
fn render_without_edits_keeps_structure() {
    let doc = Document::parse(PAGE);
    let html = doc.render();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<!-- listing -->"));
    assert!(html.contains(r#"<img alt="old" src="/old.jpg">"#));
    assert!(!html.contains("</img>"));
    assert!(html.contains("Castle &amp; Keep <b>M17267</b>"));
    assert!(html.contains("if (a < b) { go(); }"), "script text must stay raw: {html}");
    assert!(!doc.is_modified());
}

#[test]
fn select_returns_document_order() {
    let doc = Document::parse(r#"<p class="x">one</p><div><p class="x">two</p></div>"#);
    let found = doc.select(&selector("p.x"));
    assert_eq!(found.len(), 2);
    assert!(found[0] < found[1]);
    assert_eq!(doc.text(found[0]), "one");
    assert_eq!(doc.text(found[1]), "two");
}

#[test]
fn text_concatenates_descendants() {
    let doc = Document::parse(PAGE);
    let anchor = doc.select_first(&selector("a")).unwrap();
    assert_eq!(doc.text(anchor), "Castle & Keep M17267");
}

#[test]
fn set_text_replaces_children_on_render() {
    let mut doc = Document::parse(PAGE);
    let anchor = doc.select_first(&selector("a")).unwrap();
    doc.set_text(anchor, "Fort <Knox>");

    assert_eq!(doc.text(anchor), "Fort <Knox>");
    let html = doc.render();
    assert!(html.contains(
        r#"<a class="product-snippet__title-normal" href="/products/m17267">Fort &lt;Knox&gt;</a>"#
    ));
    assert!(!html.contains("<b>M17267</b>"));
    // Nodes after the rewritten element still render.
    assert!(html.contains(r#"<p class="note">plain</p>"#));
    assert!(doc.is_modified());
}

#[test]
fn set_attr_overrides_and_appends() {
    let mut doc = Document::parse(PAGE);
    let img = doc.select_first(&selector("img")).unwrap();
    doc.set_attr(img, "src", "http://img/x.jpg");
    doc.set_attr(img, "srcset", "a \"b\"");
    doc.set_attr(img, "src", "http://img/y.jpg");

    assert_eq!(doc.attr(img, "src"), Some("http://img/y.jpg"));
    assert_eq!(doc.attr(img, "alt"), Some("old"));
    let html = doc.render();
    assert!(
        html.contains(r#"<img alt="old" src="http://img/y.jpg" srcset="a &quot;b&quot;">"#),
        "{html}"
    );
}

#[test]
fn closest_includes_self_and_ancestors() {
    let doc = Document::parse(PAGE);
    let anchor = doc.select_first(&selector("a")).unwrap();
    let container = doc.closest(anchor, &selector(".product-snippet")).unwrap();
    assert_eq!(doc.closest(anchor, &selector("a")), Some(anchor));
    assert!(doc.closest(anchor, &selector(".product-image")).is_none());

    let img = doc.select_within(container, &selector("img")).unwrap();
    assert_eq!(doc.attr(img, "src"), Some("/old.jpg"));
}

#[test]
fn select_within_skips_the_scope_element() {
    let doc = Document::parse(r#"<div class="a"><div class="a" id="inner"></div></div>"#);
    let outer = doc.select_first(&selector("div.a")).unwrap();
    let inner = doc.select_within(outer, &selector("div.a")).unwrap();
    assert_eq!(doc.attr(inner, "id"), Some("inner"));
}

#[test]
fn rendering_twice_is_stable() {
    let mut doc = Document::parse(PAGE);
    let anchor = doc.select_first(&selector("a")).unwrap();
    doc.set_text(anchor, "Renamed");
    let first = doc.render();
    let reparsed = Document::parse(&first);
    assert_eq!(reparsed.render(), first);
}

#[test]
fn namespaced_attributes_keep_their_prefix() {
    let doc = Document::parse(
        r##"<div><svg><use xlink:href="#icon-cart"></use></svg></div>"##,
    );
    let html = doc.render();
    assert!(html.contains(r##"xlink:href="#icon-cart""##), "{html}");
}

#[test]
fn is_inside_checks_strict_descent() {
    let doc = Document::parse(PAGE);
    let snippet = doc.select_first(&selector(".product-snippet")).unwrap();
    let link = doc.select_first(&selector("a")).unwrap();
    let note = doc.select_first(&selector(".note")).unwrap();

    assert!(doc.is_inside(link, snippet));
    assert!(!doc.is_inside(snippet, link));
    assert!(!doc.is_inside(note, snippet));
    assert!(!doc.is_inside(link, link));
}
