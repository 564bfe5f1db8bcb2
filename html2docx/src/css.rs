//! CSS declaration parsing
//!
//! This is deliberately not a CSS engine: inline `style` attributes are split
//! into property/value pairs, and `<style>` blocks are cut into
//! `selector { declarations }` rules with a brace pattern. Nested braces,
//! comments and at-rules are not handled specially.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Property name -> raw value for a single element or rule
pub type StyleDeclaration = BTreeMap<String, String>;

/// Raw trimmed selector -> its declarations
pub type StyleSheet = BTreeMap<String, StyleDeclaration>;

static RULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{]+)\{([^}]+)\}").expect("rule pattern is valid"));

/// Parse an inline style string such as `"color: #ff0000; font-size: 12px"`
///
/// Segments are separated by `;` and split on their first `:`. Both halves
/// are trimmed. Segments without a `:` are ignored, so malformed input simply
/// yields fewer (or no) declarations.
pub fn parse_inline(style_text: &str) -> StyleDeclaration {
    let mut declarations = StyleDeclaration::new();
    for segment in style_text.split(';') {
        if let Some((property, value)) = segment.split_once(':') {
            declarations.insert(property.trim().to_string(), value.trim().to_string());
        }
    }
    declarations
}

/// Parse the text of a `<style>` element into selector rules
///
/// Later rules with the same selector replace earlier ones.
pub fn parse_stylesheet(css_text: &str) -> StyleSheet {
    RULE_PATTERN
        .captures_iter(css_text)
        .map(|caps| (caps[1].trim().to_string(), parse_inline(&caps[2])))
        .collect()
}
