//! DOCX export using the docx-rs library
//!
//! This module serializes an [`OutputDocument`] to Microsoft Word (.docx)
//! format. Documents are created from scratch with built-in title, heading
//! and list definitions; no template file is needed.

use crate::document::{
    Alignment, Block, ListKind, OutputDocument, PageMargins, Paragraph, ParagraphKind, Table,
    TextRun,
};
use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, LineSpacingType, NumberFormat, Numbering, NumberingId, PageMargin, Run,
    Shading, SpecialIndentType, Start, Style, StyleType, TableCell, TableRow, WidthType,
};
use std::collections::BTreeMap;
use std::io::{Seek, Write};
use thiserror::Error;

/// Twips (1/20 pt) per inch
const TWIPS_PER_INCH: f64 = 1440.0;

/// Width of the default docx-rs page (A4) in twips
const PAGE_WIDTH_TWIPS: f64 = 11906.0;

/// First numbering id handed out, above the docx-rs default definition
const FIRST_NUMBERING_ID: usize = 2;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// The package could not be written
    #[error("Format error: {0}")]
    FormatError(String),
}

/// Serialize the document as a .docx package into `writer`
pub fn write_docx<W: Write + Seek>(doc: &OutputDocument, writer: W) -> Result<(), ExportError> {
    log::debug!("Creating DOCX with docx-rs: {} blocks", doc.blocks.len());

    let mut docx = Docx::new().page_margin(page_margin(doc.margins));
    docx = add_heading_styles(docx);

    let (mut docx, numbering_ids) = add_list_numberings(docx, doc);
    let column_budget = usable_width_twips(doc.margins);

    for block in &doc.blocks {
        docx = match block {
            Block::Paragraph(paragraph) => {
                docx.add_paragraph(create_paragraph(paragraph, &numbering_ids))
            }
            Block::Table(table) => docx.add_table(create_table(table, column_budget)),
        };
    }

    docx.build()
        .pack(writer)
        .map_err(|e| ExportError::FormatError(format!("Failed to write DOCX: {}", e)))
}

fn inches_to_twips(inches: f64) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}

/// Points to twips, or `None` when the result does not fit an `i32`
fn points_to_twips(points: u32) -> Option<i32> {
    points.checked_mul(20).and_then(|twips| i32::try_from(twips).ok())
}

fn page_margin(margins: PageMargins) -> PageMargin {
    PageMargin::new()
        .top(inches_to_twips(margins.top))
        .bottom(inches_to_twips(margins.bottom))
        .left(inches_to_twips(margins.left))
        .right(inches_to_twips(margins.right))
}

fn usable_width_twips(margins: PageMargins) -> usize {
    let width = PAGE_WIDTH_TWIPS - (margins.left + margins.right) * TWIPS_PER_INCH;
    width.max(TWIPS_PER_INCH).round() as usize
}

/// Add title and heading styles to the document
fn add_heading_styles(mut docx: Docx) -> Docx {
    // (style id, display name, size in points)
    let heading_styles = [
        ("Title", "Title", 26),
        ("Heading1", "Heading 1", 16),
        ("Heading2", "Heading 2", 14),
        ("Heading3", "Heading 3", 13),
        ("Heading4", "Heading 4", 12),
        ("Heading5", "Heading 5", 11),
        ("Heading6", "Heading 6", 10),
    ];

    for (style_id, name, size) in heading_styles {
        let style = Style::new(style_id, StyleType::Paragraph)
            .name(name)
            .bold()
            .size(size * 2); // docx-rs uses half-points
        docx = docx.add_style(style);
    }

    docx
}

/// Get the paragraph style ID for a heading level (0 = title)
fn heading_style_id(level: u8) -> &'static str {
    match level {
        0 => "Title",
        1 => "Heading1",
        2 => "Heading2",
        3 => "Heading3",
        4 => "Heading4",
        5 => "Heading5",
        _ => "Heading6",
    }
}

/// Register one numbering definition per source list so that every numbered
/// list restarts at 1
fn add_list_numberings(mut docx: Docx, doc: &OutputDocument) -> (Docx, BTreeMap<usize, usize>) {
    let mut ids = BTreeMap::new();
    for paragraph in doc.paragraphs() {
        let ParagraphKind::ListItem { kind, list } = paragraph.kind else {
            continue;
        };
        if ids.contains_key(&list) {
            continue;
        }
        let id = FIRST_NUMBERING_ID + ids.len();
        docx = docx
            .add_abstract_numbering(AbstractNumbering::new(id).add_level(list_level(kind)))
            .add_numbering(Numbering::new(id, id));
        ids.insert(list, id);
    }
    (docx, ids)
}

fn list_level(kind: ListKind) -> Level {
    let (format, text, hanging) = match kind {
        ListKind::Bullet => ("bullet", "•", 360),
        ListKind::Numbered => ("decimal", "%1.", 420),
    };
    Level::new(
        0,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(text),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(hanging)), None, None)
}

/// Create a docx Paragraph with its runs and paragraph formatting
fn create_paragraph(
    paragraph: &Paragraph,
    numbering_ids: &BTreeMap<usize, usize>,
) -> docx_rs::Paragraph {
    let mut para = docx_rs::Paragraph::new();

    match paragraph.kind {
        ParagraphKind::Body => {}
        ParagraphKind::Title => para = para.style(heading_style_id(0)),
        ParagraphKind::Heading(level) => para = para.style(heading_style_id(level)),
        ParagraphKind::ListItem { list, .. } => {
            if let Some(&id) = numbering_ids.get(&list) {
                para = para.numbering(NumberingId::new(id), IndentLevel::new(0));
            }
        }
    }

    if let Some(alignment) = paragraph.alignment {
        para = para.align(alignment_to_docx_alignment(alignment));
    }
    if let Some(twips) = paragraph.line_spacing_pt.and_then(points_to_twips) {
        let line = LineSpacing::new()
            .line_rule(LineSpacingType::Exact)
            .line(twips);
        para = para.line_spacing(line);
    }

    for text_run in &paragraph.runs {
        para = para.add_run(create_run(text_run));
    }
    para
}

/// Create a docx Run from a TextRun with appropriate formatting
fn create_run(text_run: &TextRun) -> Run {
    let mut run = Run::new().add_text(&text_run.text);

    if text_run.bold {
        run = run.bold();
    }
    if text_run.italic {
        run = run.italic();
    }
    if text_run.underline {
        run = run.underline("single");
    }
    if let Some(points) = text_run.size_pt {
        run = run.size(points as usize * 2);
    }
    if let Some(color) = text_run.color {
        run = run.color(color.to_hex());
    }

    run
}

/// Convert Alignment to AlignmentType for paragraph formatting
fn alignment_to_docx_alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

/// Create a grid table with equal column widths
fn create_table(table: &Table, width_budget: usize) -> docx_rs::Table {
    let column_width = width_budget / table.columns.max(1);

    let rows: Vec<TableRow> = table
        .rows
        .iter()
        .map(|cells| {
            let cells: Vec<TableCell> = cells
                .iter()
                .map(|cell| {
                    let para = docx_rs::Paragraph::new().add_run(Run::new().add_text(&cell.text));
                    let mut table_cell = TableCell::new()
                        .width(column_width, WidthType::Dxa)
                        .add_paragraph(para);
                    if let Some(fill) = cell.shading {
                        table_cell = table_cell.shading(Shading::new().fill(fill.to_hex()));
                    }
                    table_cell
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    docx_rs::Table::new(rows).set_grid(vec![column_width; table.columns])
}
