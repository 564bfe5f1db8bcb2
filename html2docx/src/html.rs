//! HTML front end
//!
//! Wraps `scraper` (html5ever) so the rest of the crate sees a parsed tree
//! plus the handful of queries the mapper needs. Parsing never fails: broken
//! markup and plain text still produce a best-effort tree with a synthesized
//! `html`/`head`/`body` skeleton.

use crate::css::{self, StyleDeclaration, StyleSheet};
use scraper::{ElementRef, Html};

/// A parsed HTML document
pub struct HtmlDocument {
    tree: Html,
}

impl HtmlDocument {
    /// Parse markup into a tree
    pub fn parse(markup: &str) -> Self {
        Self {
            tree: Html::parse_document(markup),
        }
    }

    /// The document element (`<html>`)
    pub fn root(&self) -> ElementRef<'_> {
        self.tree.root_element()
    }

    /// First element with the given tag name, in document order
    pub fn find(&self, tag: &str) -> Option<ElementRef<'_>> {
        self.root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == tag)
    }

    /// Text of the first `<title>` element
    pub fn title(&self) -> Option<String> {
        self.find("title").map(text_content)
    }

    /// The `<body>` element
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.find("body")
    }

    /// Rules of every embedded `<style>` block, merged in document order
    pub fn stylesheet(&self) -> StyleSheet {
        let mut sheet = StyleSheet::new();
        for style in self
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name() == "style")
        {
            sheet.extend(css::parse_stylesheet(&text_content(style)));
        }
        sheet
    }
}

/// Flattened text of an element and all its descendants
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Declarations of the element's `style` attribute (empty when absent)
pub fn inline_style(element: ElementRef<'_>) -> StyleDeclaration {
    element
        .value()
        .attr("style")
        .map(css::parse_inline)
        .unwrap_or_default()
}

/// Direct element children with one of the given tag names
pub fn child_elements<'a>(
    element: ElementRef<'a>,
    tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| tags.contains(&child.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_body() {
        let doc = HtmlDocument::parse(
            "<html><head><title> Report </title></head><body><p>x</p></body></html>",
        );

        assert_eq!(doc.title().as_deref(), Some(" Report "));
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_plain_text_gets_synthesized_body() {
        let doc = HtmlDocument::parse("just some text");

        let body = doc.body().expect("html5ever synthesizes a body");

        assert_eq!(text_content(body), "just some text");
        assert!(doc.title().is_none());
    }

    #[test]
    fn test_stylesheet_merges_style_blocks() {
        let doc = HtmlDocument::parse(
            "<style>h1 { color: #000000 }</style><style>p { font-size: 9px }</style><p>x</p>",
        );

        let sheet = doc.stylesheet();

        assert_eq!(sheet.len(), 2);
        assert!(sheet.contains_key("h1"));
        assert!(sheet.contains_key("p"));
    }

    #[test]
    fn test_inline_style_and_child_elements() {
        let doc = HtmlDocument::parse(
            r#"<ul style="color: #010203"><li>a</li><p>no</p><li>b<li>c</li></li></ul>"#,
        );
        let list = doc.find("ul").unwrap();

        let style = inline_style(list);
        let items: Vec<String> = child_elements(list, &["li"]).map(text_content).collect();

        assert_eq!(style.get("color").map(String::as_str), Some("#010203"));
        // html5ever closes the open <li> when the next one starts
        assert_eq!(items, vec!["a", "b", "c"]);
    }
}
