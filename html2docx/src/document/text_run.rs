//! Text run representation with formatting
//!
//! A text run is a span of text with consistent formatting applied.
//! This is the fundamental unit for rendering formatted text in DOCX.

use super::types::Rgb;

/// A span of text with consistent formatting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Bold formatting
    pub bold: bool,

    /// Italic formatting
    pub italic: bool,

    /// Single underline
    pub underline: bool,

    /// Font size in points
    pub size_pt: Option<u32>,

    /// Text color
    pub color: Option<Rgb>,
}

impl TextRun {
    /// Create a new plain text run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a bold text run
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::new(text)
        }
    }

    /// Create an italic text run
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::new(text)
        }
    }

    /// Create an underlined text run
    pub fn underlined(text: impl Into<String>) -> Self {
        Self {
            underline: true,
            ..Self::new(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_plain() {
        let run = TextRun::new("plain");

        assert_eq!(run, TextRun { text: "plain".to_string(), ..TextRun::default() });
    }

    #[test]
    fn test_constructors_set_single_flag() {
        assert!(TextRun::bold("b").bold);
        assert!(TextRun::italic("i").italic);
        assert!(TextRun::underlined("u").underline);
        assert!(!TextRun::bold("b").italic);
    }
}
