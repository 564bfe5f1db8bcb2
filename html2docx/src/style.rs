//! Style resolution: CSS declarations -> run and paragraph formatting
//!
//! Only the element's own inline declarations are consulted. Pixel lengths
//! are reinterpreted directly as points (`12px` becomes 12pt); this lossy
//! mapping is kept for compatibility with documents produced so far.

use crate::css::StyleDeclaration;
use crate::document::{Alignment, Paragraph, Rgb, TextRun};
use thiserror::Error;

/// Font weights treated as bold
const BOLD_WEIGHTS: [&str; 4] = ["bold", "700", "800", "900"];

/// Largest line height whose twips value (1/20 pt) fits a WordprocessingML `i32`
pub const MAX_LINE_SPACING_PT: u32 = i32::MAX as u32 / 20;

/// Errors raised while interpreting a single declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// A pixel length that is not an integer
    #[error("invalid length for {property}: '{value}'")]
    InvalidLength {
        /// CSS property name
        property: &'static str,
        /// Raw declaration value
        value: String,
    },

    /// A `#` color that is not `#RRGGBB`
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),
}

/// Run formatting resolved from declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub size_pt: Option<u32>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
    pub underline: bool,
}

impl RunStyle {
    /// Overlay this style on a run; flags only ever switch formatting on
    fn apply_to(&self, run: &mut TextRun) {
        if let Some(size) = self.size_pt {
            run.size_pt = Some(size);
        }
        if self.bold {
            run.bold = true;
        }
        if self.italic {
            run.italic = true;
        }
        if let Some(color) = self.color {
            run.color = Some(color);
        }
        if self.underline {
            run.underline = true;
        }
    }
}

/// Apply an element's inline declarations to a paragraph and all of its runs
///
/// Run-level directives (size, weight, style, color, decoration) are applied
/// to every run currently in the paragraph, then paragraph-level directives
/// (alignment, line height). The first declaration that fails to parse is
/// logged as a warning and the remaining directives are skipped; the error
/// never reaches the caller.
pub fn apply(paragraph: &mut Paragraph, declarations: &StyleDeclaration) {
    if declarations.is_empty() {
        return;
    }
    if let Err(e) = try_apply(paragraph, declarations) {
        log::warn!("Error applying CSS styles: {e}");
    }
}

fn try_apply(paragraph: &mut Paragraph, declarations: &StyleDeclaration) -> Result<(), StyleError> {
    if !paragraph.runs.is_empty() {
        let mut run_style = RunStyle::default();
        let resolved = resolve_run_style(declarations, &mut run_style);
        for run in &mut paragraph.runs {
            run_style.apply_to(run);
        }
        resolved?;
    }

    if let Some(alignment) = declarations.get("text-align").and_then(|v| parse_alignment(v)) {
        paragraph.alignment = Some(alignment);
    }

    if let Some(line_height) = declarations.get("line-height") {
        if line_height.ends_with("px") {
            let points = parse_px("line-height", line_height)?;
            if points > MAX_LINE_SPACING_PT {
                return Err(StyleError::InvalidLength {
                    property: "line-height",
                    value: line_height.clone(),
                });
            }
            paragraph.line_spacing_pt = Some(points);
        }
    }

    Ok(())
}

/// Resolve run directives in declaration-priority order
///
/// Directives resolved before a failure stay in `style`.
pub fn resolve_run_style(
    declarations: &StyleDeclaration,
    style: &mut RunStyle,
) -> Result<(), StyleError> {
    if let Some(size) = declarations.get("font-size") {
        if size.contains("px") {
            style.size_pt = Some(parse_px("font-size", size)?);
        }
    }

    if let Some(weight) = declarations.get("font-weight") {
        if BOLD_WEIGHTS.contains(&weight.as_str()) {
            style.bold = true;
        }
    }

    if declarations.get("font-style").is_some_and(|s| s == "italic") {
        style.italic = true;
    }

    if let Some(color) = declarations.get("color") {
        if let Some(rgb) = parse_hex_color(color)? {
            style.color = Some(rgb);
        }
    }

    if declarations
        .get("text-decoration")
        .is_some_and(|d| d.contains("underline"))
    {
        style.underline = true;
    }

    Ok(())
}

/// Map a `text-align` value; `left` and unknown values keep the default
pub fn parse_alignment(value: &str) -> Option<Alignment> {
    match value {
        "center" => Some(Alignment::Center),
        "right" => Some(Alignment::Right),
        "justify" => Some(Alignment::Justify),
        _ => None,
    }
}

/// Parse a `#RRGGBB` color
///
/// Returns `Ok(None)` for values that are not hex colors at all (named
/// colors, `rgb()`), which are unsupported and skipped.
pub fn parse_hex_color(value: &str) -> Result<Option<Rgb>, StyleError> {
    if !value.starts_with('#') {
        return Ok(None);
    }
    let hex = value.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| StyleError::InvalidColor(value.to_string()))
    };
    Ok(Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)))
}

/// Parse an integer pixel length, reinterpreted as points
fn parse_px(property: &'static str, value: &str) -> Result<u32, StyleError> {
    value
        .replace("px", "")
        .trim()
        .parse()
        .map_err(|_| StyleError::InvalidLength {
            property,
            value: value.to_string(),
        })
}
