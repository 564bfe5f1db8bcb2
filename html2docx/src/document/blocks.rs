//! Block-level document elements
//!
//! This module defines the structured representation of the output document
//! at the block level (paragraphs, headings, list items, tables).

use super::text_run::TextRun;
use super::types::{Alignment, ListKind, Rgb};

/// Block-level document element
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph of formatted text (includes headings and list items)
    Paragraph(Paragraph),

    /// A grid table
    Table(Table),
}

impl Block {
    /// The paragraph held by this block, if any
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Table(_) => None,
        }
    }

    /// The table held by this block, if any
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        }
    }
}

/// Role of a paragraph in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Plain body text
    Body,

    /// Document title (the unnumbered top-level heading)
    Title,

    /// Heading with level 1 through 6
    Heading(u8),

    /// List item
    ListItem {
        /// Bulleted or numbered
        kind: ListKind,
        /// Ordinal of the source list this item belongs to, so numbering can
        /// restart for every list
        list: usize,
    },
}

/// A paragraph: an ordered sequence of runs plus paragraph formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Role of the paragraph
    pub kind: ParagraphKind,

    /// Formatted text runs in source order
    pub runs: Vec<TextRun>,

    /// Horizontal alignment (None = document default)
    pub alignment: Option<Alignment>,

    /// Fixed line spacing in points
    pub line_spacing_pt: Option<u32>,
}

impl Paragraph {
    /// Create an empty paragraph of the given kind
    pub fn new(kind: ParagraphKind) -> Self {
        Self {
            kind,
            runs: Vec::new(),
            alignment: None,
            line_spacing_pt: None,
        }
    }

    /// Create a paragraph holding `text` as a single plain run
    ///
    /// Empty text produces a paragraph without runs.
    pub fn with_text(kind: ParagraphKind, text: &str) -> Self {
        let mut paragraph = Self::new(kind);
        if !text.is_empty() {
            paragraph.runs.push(TextRun::new(text));
        }
        paragraph
    }

    /// Append a run
    pub fn push_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Heading level if this is a heading (0 for the title)
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            ParagraphKind::Title => Some(0),
            ParagraphKind::Heading(level) => Some(level),
            _ => None,
        }
    }
}

/// A grid table with a fixed column count
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Number of columns (taken from the first source row)
    pub columns: usize,

    /// Rows; every row has exactly `columns` cells
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Create a table of empty cells
    pub fn new(row_count: usize, columns: usize) -> Self {
        Self {
            columns,
            rows: vec![vec![TableCell::default(); columns]; row_count],
        }
    }

    /// Text of the cell at `row`, `col`
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.text.as_str())
    }
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCell {
    /// Plain cell text
    pub text: String,

    /// Background fill color
    pub shading: Option<Rgb>,
}
