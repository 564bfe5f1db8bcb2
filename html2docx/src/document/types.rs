//! Shared type definitions

use std::fmt;

/// Paragraph alignment
///
/// Left alignment is the document default and is represented by the absence
/// of an alignment on the paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Right,
    Justify,
}

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Hex form used by WordprocessingML attributes (e.g. `FF8000`)
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Kind of list a list paragraph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `<ul>`: bulleted list
    Bullet,
    /// `<ol>`: numbered list
    Numbered,
}

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl PageMargins {
    /// The same margin on all four sides
    pub fn uniform(inches: f64) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(0.2)
    }
}
