//! Element-to-document mapping
//!
//! Walks the parsed HTML tree and appends headings, paragraphs, list items
//! and tables to an [`OutputDocument`] in source order. Every element tag is
//! classified once into a [`NodeKind`]; the walk dispatches exhaustively over
//! that kind rather than comparing tag names along the way.

mod table;

pub use table::map_table;

use crate::css::StyleDeclaration;
use crate::document::{ListKind, OutputDocument, Paragraph, ParagraphKind, TextRun};
use crate::html::{child_elements, inline_style, text_content};
use crate::style::{self, parse_hex_color};
use scraper::{ElementRef, Node};

/// Block-level role of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1`..`h6`
    Heading(u8),
    /// `p`: paragraph with mixed inline content
    Paragraph,
    /// `br`: rendered as an empty paragraph
    LineBreak,
    /// `ul` / `ol`
    List(ListKind),
    /// `table`
    Table,
    /// `div`, `span`, `section`, `article`: children are mapped in place
    Container,
    /// Everything else
    Ignored,
}

impl NodeKind {
    /// Classify an element by its tag name
    pub fn of_tag(tag: &str) -> Self {
        match tag {
            "h1" => NodeKind::Heading(1),
            "h2" => NodeKind::Heading(2),
            "h3" => NodeKind::Heading(3),
            "h4" => NodeKind::Heading(4),
            "h5" => NodeKind::Heading(5),
            "h6" => NodeKind::Heading(6),
            "p" => NodeKind::Paragraph,
            "br" => NodeKind::LineBreak,
            "ul" => NodeKind::List(ListKind::Bullet),
            "ol" => NodeKind::List(ListKind::Numbered),
            "table" => NodeKind::Table,
            "div" | "span" | "section" | "article" => NodeKind::Container,
            _ => NodeKind::Ignored,
        }
    }
}

/// Role of an element inside a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    Strong,
    Emphasis,
    Underline,
    Span,
    Other,
}

impl InlineKind {
    fn of_tag(tag: &str) -> Self {
        match tag {
            "strong" | "b" => InlineKind::Strong,
            "em" | "i" => InlineKind::Emphasis,
            "u" => InlineKind::Underline,
            "span" => InlineKind::Span,
            _ => InlineKind::Other,
        }
    }
}

/// Appends mapped blocks to a document
pub struct Mapper<'d> {
    doc: &'d mut OutputDocument,
    /// Lists seen so far; list items carry the ordinal of their list
    list_count: usize,
}

impl<'d> Mapper<'d> {
    /// Create a mapper writing into `doc`
    pub fn new(doc: &'d mut OutputDocument) -> Self {
        Self { doc, list_count: 0 }
    }

    /// Map every child node of `container`
    pub fn map_children(&mut self, container: ElementRef<'_>) {
        for child in container.children() {
            if let Some(text) = child.value().as_text() {
                self.map_text(text, container);
            } else if let Some(element) = ElementRef::wrap(child) {
                self.map_element(element);
            }
        }
    }

    /// A loose text node becomes its own paragraph styled by the parent
    fn map_text(&mut self, text: &str, parent: ElementRef<'_>) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let paragraph = self
            .doc
            .add_paragraph(Paragraph::with_text(ParagraphKind::Body, text));
        style::apply(paragraph, &inline_style(parent));
    }

    fn map_element(&mut self, element: ElementRef<'_>) {
        match NodeKind::of_tag(element.value().name()) {
            NodeKind::Heading(level) => {
                let text = text_content(element);
                let heading = self.doc.add_paragraph(Paragraph::with_text(
                    ParagraphKind::Heading(level),
                    text.trim(),
                ));
                style::apply(heading, &inline_style(element));
            }
            NodeKind::Paragraph => {
                let declarations = inline_style(element);
                let paragraph = self
                    .doc
                    .add_paragraph(Paragraph::new(ParagraphKind::Body));
                fill_runs(element, paragraph, &declarations);
                style::apply(paragraph, &declarations);
            }
            NodeKind::LineBreak => {
                self.doc.add_paragraph(Paragraph::new(ParagraphKind::Body));
            }
            NodeKind::List(kind) => self.map_list(element, kind),
            NodeKind::Table => {
                if let Some(table) = map_table(element) {
                    self.doc.add_table(table);
                }
            }
            NodeKind::Container => self.map_children(element),
            NodeKind::Ignored => {
                log::trace!("Ignoring <{}>", element.value().name());
            }
        }
    }

    /// One list paragraph per direct `li` child
    fn map_list(&mut self, list: ElementRef<'_>, kind: ListKind) {
        self.list_count += 1;
        let item_kind = ParagraphKind::ListItem {
            kind,
            list: self.list_count,
        };
        for item in child_elements(list, &["li"]) {
            let text = text_content(item);
            let paragraph = self
                .doc
                .add_paragraph(Paragraph::with_text(item_kind, text.trim()));
            style::apply(paragraph, &inline_style(item));
        }
    }
}

/// Turn the content of a `<p>` into runs
///
/// The paragraph element's declarations are re-applied to the whole paragraph
/// after every text run, so formatting of earlier runs (including a span
/// color) can be overridden by the paragraph's own style.
fn fill_runs(element: ElementRef<'_>, paragraph: &mut Paragraph, declarations: &StyleDeclaration) {
    for content in element.children() {
        match content.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    paragraph.push_run(TextRun::new(text));
                    style::apply(paragraph, declarations);
                }
            }
            Node::Element(_) => {
                if let Some(inline) = ElementRef::wrap(content) {
                    paragraph.push_run(inline_run(inline));
                }
            }
            _ => {}
        }
    }
}

/// A run holding the flattened text of an inline element
fn inline_run(element: ElementRef<'_>) -> TextRun {
    let text = text_content(element);
    match InlineKind::of_tag(element.value().name()) {
        InlineKind::Strong => TextRun::bold(text),
        InlineKind::Emphasis => TextRun::italic(text),
        InlineKind::Underline => TextRun::underlined(text),
        InlineKind::Span => {
            let mut run = TextRun::new(text);
            if let Some(color) = inline_style(element).get("color") {
                match parse_hex_color(color) {
                    Ok(rgb) => run.color = rgb,
                    Err(e) => log::warn!("Ignoring span color: {e}"),
                }
            }
            run
        }
        InlineKind::Other => TextRun::new(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, Block, Rgb};
    use crate::html::HtmlDocument;

    fn map_body(markup: &str) -> OutputDocument {
        let html = HtmlDocument::parse(markup);
        let mut doc = OutputDocument::default();
        Mapper::new(&mut doc).map_children(html.body().unwrap());
        doc
    }

    fn paragraphs(doc: &OutputDocument) -> Vec<&Paragraph> {
        doc.paragraphs().collect()
    }

    #[test]
    fn test_node_kind_classification() {
        assert_eq!(NodeKind::of_tag("h3"), NodeKind::Heading(3));
        assert_eq!(NodeKind::of_tag("ol"), NodeKind::List(ListKind::Numbered));
        assert_eq!(NodeKind::of_tag("article"), NodeKind::Container);
        assert_eq!(NodeKind::of_tag("h7"), NodeKind::Ignored);
        assert_eq!(NodeKind::of_tag("script"), NodeKind::Ignored);
    }

    #[test]
    fn test_every_heading_level() {
        // Arrange
        let markup = "<h1> One </h1><h2>Two</h2><h3>Three</h3><h4>Four</h4><h5>Five</h5><h6>Six</h6>";

        // Act
        let doc = map_body(markup);

        // Assert
        let headings: Vec<_> = paragraphs(&doc)
            .iter()
            .map(|p| (p.heading_level(), p.text()))
            .collect();
        assert_eq!(
            headings,
            vec![
                (Some(1), "One".to_string()),
                (Some(2), "Two".to_string()),
                (Some(3), "Three".to_string()),
                (Some(4), "Four".to_string()),
                (Some(5), "Five".to_string()),
                (Some(6), "Six".to_string()),
            ]
        );
    }

    #[test]
    fn test_mixed_content_runs() {
        // Arrange
        let markup = "<p>A <strong>B</strong> C <em>D</em><u>E</u><b>F</b><i>G</i><code>H</code></p>";

        // Act
        let doc = map_body(markup);

        // Assert
        let p = paragraphs(&doc)[0];
        let runs: Vec<_> = p
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.bold, r.italic, r.underline))
            .collect();
        assert_eq!(
            runs,
            vec![
                ("A", false, false, false),
                ("B", true, false, false),
                ("C", false, false, false),
                ("D", false, true, false),
                ("E", false, false, true),
                ("F", true, false, false),
                ("G", false, true, false),
                ("H", false, false, false),
            ]
        );
    }

    #[test]
    fn test_nested_inline_markup_is_flattened() {
        let doc = map_body("<p><strong>bold <em>and italic</em></strong></p>");

        let p = paragraphs(&doc)[0];

        assert_eq!(p.runs.len(), 1);
        assert_eq!(p.runs[0].text, "bold and italic");
        assert!(p.runs[0].bold);
        assert!(!p.runs[0].italic);
    }

    #[test]
    fn test_span_color() {
        let doc = map_body(
            r#"<p><span style="color: #00FF00">green</span><span style="color: teal">teal</span></p>"#,
        );

        let p = paragraphs(&doc)[0];

        assert_eq!(p.runs[0].color, Some(Rgb(0, 255, 0)));
        assert_eq!(p.runs[1].color, None);
    }

    #[test]
    fn test_paragraph_style_is_reapplied_over_earlier_runs() {
        // The paragraph color is applied after each text run and once more at
        // the end, so it replaces the span's own color.
        let doc = map_body(
            r#"<p style="color: #0000FF; font-weight: bold"><span style="color: #FF0000">s</span> tail</p>"#,
        );

        let p = paragraphs(&doc)[0];

        assert_eq!(p.runs.len(), 2);
        assert!(p.runs.iter().all(|r| r.bold));
        assert!(p.runs.iter().all(|r| r.color == Some(Rgb(0, 0, 255))));
    }

    #[test]
    fn test_paragraph_alignment_and_spacing() {
        let doc = map_body(r#"<p style="text-align: right; line-height: 20px">x</p>"#);

        let p = paragraphs(&doc)[0];

        assert_eq!(p.alignment, Some(Alignment::Right));
        assert_eq!(p.line_spacing_pt, Some(20));
    }

    #[test]
    fn test_lists() {
        // Arrange
        let markup = "<ul><li>one</li><li> two </li><li>three</li></ul><ol><li>first</li></ol>";

        // Act
        let doc = map_body(markup);

        // Assert
        let items: Vec<_> = paragraphs(&doc).iter().map(|p| (p.kind, p.text())).collect();
        let bullet = ParagraphKind::ListItem {
            kind: ListKind::Bullet,
            list: 1,
        };
        let numbered = ParagraphKind::ListItem {
            kind: ListKind::Numbered,
            list: 2,
        };
        assert_eq!(
            items,
            vec![
                (bullet, "one".to_string()),
                (bullet, "two".to_string()),
                (bullet, "three".to_string()),
                (numbered, "first".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_item_style() {
        let doc = map_body(r#"<ul><li style="font-style: italic">x</li></ul>"#);

        assert!(paragraphs(&doc)[0].runs[0].italic);
    }

    #[test]
    fn test_containers_recurse_and_text_uses_parent_style() {
        // Arrange
        let markup = r#"<div style="text-align: center">loose<section><article><h2>Deep</h2></article></section></div>"#;

        // Act
        let doc = map_body(markup);

        // Assert
        let ps = paragraphs(&doc);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].text(), "loose");
        assert_eq!(ps[0].kind, ParagraphKind::Body);
        assert_eq!(ps[0].alignment, Some(Alignment::Center));
        assert_eq!(ps[1].heading_level(), Some(2));
    }

    #[test]
    fn test_line_breaks_and_ignored_tags() {
        let doc = map_body("<br><script>var x;</script><nav>menu</nav><!-- note --><br>");

        assert_eq!(doc.blocks.len(), 2);
        assert!(paragraphs(&doc).iter().all(|p| p.runs.is_empty()));
    }

    #[test]
    fn test_blocks_preserve_source_order() {
        let doc = map_body("<h1>T</h1><table><tr><td>c</td></tr></table><p>after</p>");

        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
        assert!(matches!(doc.blocks[1], Block::Table(_)));
        assert_eq!(doc.blocks[2].as_paragraph().map(Paragraph::text), Some("after".into()));
    }
}
