//! Parsed page with an edit overlay.
//!
//! `scraper` trees are read-only, so writes (text content and attribute
//! assignments) are recorded per element and applied when the page is
//! rendered back to HTML. Reads through [`Document`] see the recorded
//! writes, which keeps a second pass over the same document consistent
//! with what a browser would show after the first.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Node, Selector};

/// Stable reference to an element: its position in a pre-order walk of the
/// tree. Edits never change tree shape, so positions stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(usize);

#[derive(Debug, Default)]
struct Overlay {
    text: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Overlay {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

pub struct Document {
    html: Html,
    overlays: HashMap<usize, Overlay>,
}

impl Document {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            overlays: HashMap::new(),
        }
    }

    /// All elements matching `selector`, in document order.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Vec<ElementHandle> {
        self.html
            .select(selector)
            .filter_map(|el| self.handle_of(el))
            .collect()
    }

    #[must_use]
    pub fn select_first(&self, selector: &Selector) -> Option<ElementHandle> {
        self.html
            .select(selector)
            .next()
            .and_then(|el| self.handle_of(el))
    }

    #[must_use]
    pub fn exists(&self, selector: &Selector) -> bool {
        self.html.select(selector).next().is_some()
    }

    /// Nearest element, starting with `handle` itself and walking up, that
    /// matches `selector`.
    #[must_use]
    pub fn closest(&self, handle: ElementHandle, selector: &Selector) -> Option<ElementHandle> {
        let el = self.element(handle)?;
        std::iter::once(*el)
            .chain(el.ancestors())
            .filter_map(ElementRef::wrap)
            .find(|candidate| selector.matches(candidate))
            .and_then(|found| self.handle_of(found))
    }

    /// First descendant of `handle` matching `selector`.
    #[must_use]
    pub fn select_within(
        &self,
        handle: ElementHandle,
        selector: &Selector,
    ) -> Option<ElementHandle> {
        let el = self.element(handle)?;
        el.select(selector)
            .find(|found| found.id() != el.id())
            .and_then(|found| self.handle_of(found))
    }

    /// Whether `inner` is a descendant of `outer`. An element is not inside
    /// itself.
    #[must_use]
    pub fn is_inside(&self, inner: ElementHandle, outer: ElementHandle) -> bool {
        let (Some(inner), Some(outer)) = (self.element(inner), self.element(outer)) else {
            return false;
        };
        inner.ancestors().any(|node| node.id() == outer.id())
    }

    /// Text content, including any text written through [`Document::set_text`].
    #[must_use]
    pub fn text(&self, handle: ElementHandle) -> String {
        if let Some(text) = self.overlays.get(&handle.0).and_then(|o| o.text.as_ref()) {
            return text.clone();
        }
        self.element(handle)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    /// Attribute value, including values written through [`Document::set_attr`].
    #[must_use]
    pub fn attr(&self, handle: ElementHandle, name: &str) -> Option<&str> {
        if let Some(value) = self.overlays.get(&handle.0).and_then(|o| o.attr(name)) {
            return Some(value);
        }
        self.element(handle)?.value().attr(name)
    }

    /// Replaces the element's children with a single text node.
    pub fn set_text(&mut self, handle: ElementHandle, text: impl Into<String>) {
        self.overlays.entry(handle.0).or_default().text = Some(text.into());
    }

    pub fn set_attr(&mut self, handle: ElementHandle, name: &str, value: impl Into<String>) {
        let value = value.into();
        let overlay = self.overlays.entry(handle.0).or_default();
        match overlay.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => overlay.attrs.push((name.to_owned(), value)),
        }
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.overlays.is_empty()
    }

    /// Serializes the document with all recorded edits applied.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut index = 0usize;
        // (node, closing) pairs; children are pushed in reverse so they pop
        // in document order, which keeps `index` aligned with `handle_of`.
        let mut stack = vec![(self.html.tree.root(), false)];

        while let Some((node, closing)) = stack.pop() {
            if closing {
                if let Node::Element(element) = node.value() {
                    out.push_str("</");
                    out.push_str(element.name());
                    out.push('>');
                }
                continue;
            }

            let position = index;
            index += 1;

            match node.value() {
                Node::Doctype(doctype) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(doctype.name());
                    out.push('>');
                }
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
                Node::Text(text) => {
                    let raw = node
                        .parent()
                        .and_then(|p| p.value().as_element())
                        .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));
                    if raw {
                        out.push_str(text);
                    } else {
                        escape_text(text, &mut out);
                    }
                }
                Node::Element(element) => {
                    let overlay = self.overlays.get(&position);
                    write_start_tag(element, overlay, &mut out);

                    if VOID_ELEMENTS.contains(&element.name()) {
                        index += node.descendants().count() - 1;
                        continue;
                    }

                    stack.push((node, true));
                    if let Some(text) = overlay.and_then(|o| o.text.as_ref()) {
                        escape_text(text, &mut out);
                        index += node.descendants().count() - 1;
                        continue;
                    }
                    let children: Vec<_> = node.children().collect();
                    stack.extend(children.into_iter().rev().map(|child| (child, false)));
                }
                Node::Document | Node::Fragment => {
                    let children: Vec<_> = node.children().collect();
                    stack.extend(children.into_iter().rev().map(|child| (child, false)));
                }
                Node::ProcessingInstruction(_) => {}
            }
        }

        out
    }

    fn element(&self, handle: ElementHandle) -> Option<ElementRef<'_>> {
        self.html
            .tree
            .root()
            .descendants()
            .nth(handle.0)
            .and_then(ElementRef::wrap)
    }

    fn handle_of(&self, el: ElementRef<'_>) -> Option<ElementHandle> {
        self.html
            .tree
            .root()
            .descendants()
            .position(|node| node.id() == el.id())
            .map(ElementHandle)
    }
}

/// Attributes are written sorted by name so output does not depend on the
/// iteration order of scraper's attribute map. Foreign attributes keep their
/// prefix (`xlink:href`); overlay edits address attributes by local name.
fn write_start_tag(element: &scraper::node::Element, overlay: Option<&Overlay>, out: &mut String) {
    let mut attrs: Vec<(String, &str)> = element
        .attrs
        .iter()
        .map(|(qual, value)| {
            let local: &str = &qual.local;
            let name = match &qual.prefix {
                Some(prefix) => format!("{prefix}:{local}"),
                None => local.to_owned(),
            };
            let value = match overlay.and_then(|o| o.attr(local)) {
                Some(edited) if qual.prefix.is_none() => edited,
                _ => &**value,
            };
            (name, value)
        })
        .collect();
    if let Some(overlay) = overlay {
        attrs.extend(
            overlay
                .attrs
                .iter()
                .filter(|(name, _)| element.attr(name).is_none())
                .map(|(name, value)| (name.clone(), value.as_str())),
        );
    }
    attrs.sort_by(|a, b| a.0.cmp(&b.0));

    out.push('<');
    out.push_str(element.name());
    for (name, value) in &attrs {
        write_attr(name, value, out);
    }
    out.push('>');
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
