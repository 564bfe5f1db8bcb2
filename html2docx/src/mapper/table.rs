//! HTML table -> grid table

use crate::document::{Rgb, Table};
use crate::html::{child_elements, inline_style, text_content};
use crate::style::parse_hex_color;
use scraper::ElementRef;

const ROW_GROUPS: [&str; 3] = ["thead", "tbody", "tfoot"];
const CELLS: [&str; 2] = ["td", "th"];

/// Convert a `<table>` element into a grid table
///
/// The first row fixes the column count: longer rows lose their excess
/// cells, shorter rows keep empty trailing cells. Returns `None` when the
/// table has no rows or its first row has no cells.
pub fn map_table(table: ElementRef<'_>) -> Option<Table> {
    let rows = table_rows(table);
    let columns = child_elements(*rows.first()?, &CELLS).count();
    if columns == 0 {
        log::debug!("Skipping table whose first row has no cells");
        return None;
    }

    let mut grid = Table::new(rows.len(), columns);
    for (row, grid_row) in rows.iter().zip(grid.rows.iter_mut()) {
        for (cell, grid_cell) in child_elements(*row, &CELLS).zip(grid_row.iter_mut()) {
            grid_cell.text = text_content(cell).trim().to_string();
            grid_cell.shading = cell_shading(cell);
        }
    }
    Some(grid)
}

/// Rows owned by this table, in document order
///
/// Only direct `tr` children and the `tr` children of direct row groups are
/// collected, so rows of a table nested inside a cell stay with that table.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        let name = child.value().name();
        if name == "tr" {
            rows.push(child);
        } else if ROW_GROUPS.contains(&name) {
            rows.extend(child_elements(child, &["tr"]));
        }
    }
    rows
}

/// Background fill from an inline `background-color: #RRGGBB`
fn cell_shading(cell: ElementRef<'_>) -> Option<Rgb> {
    let style = inline_style(cell);
    let value = style.get("background-color")?;
    match parse_hex_color(value) {
        Ok(color) => color,
        Err(e) => {
            log::warn!("Ignoring cell background: {e}");
            None
        }
    }
}
