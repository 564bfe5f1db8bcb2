//! Output document model
//!
//! The mapper fills an [`OutputDocument`] with blocks in source order; the
//! DOCX exporter serializes it. A document lives for exactly one conversion.

mod blocks;
mod text_run;
mod types;

pub use blocks::{Block, Paragraph, ParagraphKind, Table, TableCell};
pub use text_run::TextRun;
pub use types::{Alignment, ListKind, PageMargins, Rgb};

/// The document being built by one conversion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputDocument {
    /// Page margins of the single document section
    pub margins: PageMargins,

    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl OutputDocument {
    /// Create an empty document with the given margins
    pub fn new(margins: PageMargins) -> Self {
        Self {
            margins,
            blocks: Vec::new(),
        }
    }

    /// Append a paragraph and return a handle to it for styling
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(paragraph));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(paragraph)) => paragraph,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append a table
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// All paragraphs (including headings and list items) in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// All tables in order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Total word count across paragraphs and table cells
    pub fn word_count(&self) -> usize {
        let paragraph_words: usize = self
            .paragraphs()
            .flat_map(|p| p.runs.iter())
            .map(|run| run.text.split_whitespace().count())
            .sum();
        let cell_words: usize = self
            .tables()
            .flat_map(|t| t.rows.iter().flatten())
            .map(|cell| cell.text.split_whitespace().count())
            .sum();
        paragraph_words + cell_words
    }
}
