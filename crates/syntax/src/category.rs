// Chunk: docs/chunks/syntax_classifier - Capture name to highlight category mapping

//! Maps tree-sitter capture names (e.g., "keyword", "function.macro") to
//! [`HighlightCategory`] values.
//!
//! Lookup tries the exact name first, then progressively shorter dotted
//! prefixes, so "function.method.call" resolves through "function.method" to
//! "function".

use gapedit_buffer::HighlightCategory;

/// Capture names with a category of their own. Anything not reachable from
/// this table by prefix is left unhighlighted.
const CAPTURE_CATEGORIES: &[(&str, HighlightCategory)] = &[
    ("comment", HighlightCategory::Comment),
    ("keyword", HighlightCategory::Keyword),
    ("keyword.directive", HighlightCategory::Directive),
    ("preproc", HighlightCategory::Directive),
    ("include", HighlightCategory::Directive),
    ("operator", HighlightCategory::Operator),
    ("type", HighlightCategory::Type),
    ("constructor", HighlightCategory::Type),
    ("function", HighlightCategory::Function),
    ("function.macro", HighlightCategory::Macro),
    ("macro", HighlightCategory::Macro),
    ("number", HighlightCategory::NumericLiteral),
    ("float", HighlightCategory::NumericLiteral),
    ("string", HighlightCategory::StringLiteral),
    ("character", HighlightCategory::StringLiteral),
    ("escape", HighlightCategory::StringLiteral),
    ("attribute", HighlightCategory::Annotation),
    ("decorator", HighlightCategory::Annotation),
    ("constant", HighlightCategory::Constant),
    ("boolean", HighlightCategory::Constant),
    ("punctuation", HighlightCategory::Punctuation),
    ("delimiter", HighlightCategory::Punctuation),
    ("variable", HighlightCategory::Identifier),
    ("property", HighlightCategory::Identifier),
    ("label", HighlightCategory::Identifier),
    ("module", HighlightCategory::Identifier),
    ("namespace", HighlightCategory::Identifier),
];

fn lookup(name: &str) -> Option<HighlightCategory> {
    CAPTURE_CATEGORIES
        .iter()
        .find(|(capture, _)| *capture == name)
        .map(|(_, category)| *category)
}

/// Returns the category for a capture name, if any.
pub fn category_for_capture(name: &str) -> Option<HighlightCategory> {
    if let Some(category) = lookup(name) {
        return Some(category);
    }

    let mut prefix = name;
    while let Some(dot_pos) = prefix.rfind('.') {
        prefix = &prefix[..dot_pos];
        if let Some(category) = lookup(prefix) {
            return Some(category);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(category_for_capture("keyword"), Some(HighlightCategory::Keyword));
        assert_eq!(category_for_capture("comment"), Some(HighlightCategory::Comment));
    }

    #[test]
    fn test_prefix_matching() {
        assert_eq!(
            category_for_capture("comment.documentation"),
            Some(HighlightCategory::Comment)
        );
        assert_eq!(
            category_for_capture("function.method.call"),
            Some(HighlightCategory::Function)
        );
        assert_eq!(
            category_for_capture("punctuation.bracket"),
            Some(HighlightCategory::Punctuation)
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(category_for_capture("function.macro"), Some(HighlightCategory::Macro));
        assert_eq!(
            category_for_capture("keyword.directive.define"),
            Some(HighlightCategory::Directive)
        );
    }

    #[test]
    fn test_unknown_capture() {
        assert_eq!(category_for_capture("embedded"), None);
        assert_eq!(category_for_capture("spell"), None);
    }
}
