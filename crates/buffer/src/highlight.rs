// Chunk: docs/chunks/tokenizer_trigger - Highlight spans and the classifier contract

//! Highlight spans and the classifier contract.
//!
//! A [`Classifier`] turns the full document content into an ordered list of
//! non-overlapping [`HighlightSpan`]s. The document owns the spans and throws
//! them away after every edit; nothing here is patched incrementally.
//!
//! Classifiers are supplied by the embedder. This crate only ships
//! [`PlainText`], which produces no spans.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Token category assigned to a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    Comment,
    Identifier,
    Keyword,
    Operator,
    Type,
    Function,
    Macro,
    NumericLiteral,
    StringLiteral,
    /// Preprocessor directives and similar.
    Directive,
    /// Attributes, decorators.
    Annotation,
    Constant,
    Punctuation,
}

impl HighlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightCategory::Comment => "comment",
            HighlightCategory::Identifier => "identifier",
            HighlightCategory::Keyword => "keyword",
            HighlightCategory::Operator => "operator",
            HighlightCategory::Type => "type",
            HighlightCategory::Function => "function",
            HighlightCategory::Macro => "macro",
            HighlightCategory::NumericLiteral => "number",
            HighlightCategory::StringLiteral => "string",
            HighlightCategory::Directive => "directive",
            HighlightCategory::Annotation => "annotation",
            HighlightCategory::Constant => "constant",
            HighlightCategory::Punctuation => "punctuation",
        }
    }
}

impl fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized run of codepoints: `[offset, offset + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub offset: usize,
    pub length: usize,
    pub category: HighlightCategory,
}

impl HighlightSpan {
    pub fn new(offset: usize, length: usize, category: HighlightCategory) -> Self {
        Self {
            offset,
            length,
            category,
        }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Identifies the rule set a classifier applies.
///
/// Derived from the file extension, lowercased. The empty id means plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_ascii_lowercase())
    }

    /// The plain-text language, for which no classifier has rules.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_plain(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            f.write_str("plain")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Errors a classifier can report.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("no rules available for language '{language}': {reason}")]
    Unavailable { language: LanguageId, reason: String },

    #[error("classification of '{language}' failed: {reason}")]
    Failed { language: LanguageId, reason: String },

    #[error("classifier returned malformed spans: {reason}")]
    MalformedSpans { reason: String },
}

/// Produces highlight spans for a complete document.
///
/// Implementations must return spans ordered by offset, non-overlapping and
/// within `content`'s codepoint length. Offsets count codepoints, not bytes.
/// Languages the classifier does not know classify to no spans.
pub trait Classifier {
    fn classify(
        &self,
        content: &str,
        language: &LanguageId,
    ) -> Result<Vec<HighlightSpan>, ClassifyError>;
}

/// Classifier with no rules; every document is plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Classifier for PlainText {
    fn classify(
        &self,
        _content: &str,
        _language: &LanguageId,
    ) -> Result<Vec<HighlightSpan>, ClassifyError> {
        Ok(Vec::new())
    }
}

/// Checks that `spans` are ordered, non-overlapping and end within `len`.
pub fn validate_spans(spans: &[HighlightSpan], len: usize) -> Result<(), ClassifyError> {
    let mut previous_end = 0;
    for (i, span) in spans.iter().enumerate() {
        if span.offset < previous_end {
            return Err(ClassifyError::MalformedSpans {
                reason: format!(
                    "span {} at {} overlaps or precedes the previous span ending at {}",
                    i, span.offset, previous_end
                ),
            });
        }
        if span.end() > len {
            return Err(ClassifyError::MalformedSpans {
                reason: format!("span {} ends at {} past document length {}", i, span.end(), len),
            });
        }
        previous_end = span.end();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn span(offset: usize, length: usize) -> HighlightSpan {
        HighlightSpan::new(offset, length, HighlightCategory::Keyword)
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(LanguageId::from_path(&PathBuf::from("main.RS")).as_str(), "rs");
        assert_eq!(LanguageId::from_path(&PathBuf::from("a/b.tar.gz")).as_str(), "gz");
        assert!(LanguageId::from_path(&PathBuf::from("Makefile")).is_plain());
    }

    #[test]
    fn test_plain_text_classifies_nothing() {
        let spans = PlainText.classify("fn main() {}", &LanguageId::new("rs")).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_validate_accepts_adjacent_spans() {
        assert!(validate_spans(&[span(0, 2), span(2, 3), span(7, 1)], 8).is_ok());
        assert!(validate_spans(&[], 0).is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let err = validate_spans(&[span(0, 3), span(2, 1)], 10).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedSpans { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        assert!(validate_spans(&[span(4, 3)], 6).is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(HighlightCategory::StringLiteral.to_string(), "string");
        assert_eq!(HighlightCategory::NumericLiteral.as_str(), "number");
    }
}
