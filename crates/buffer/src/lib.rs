// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

//! gapedit-buffer: the document model for the gapedit editor.
//!
//! A [`Document`] stores file contents in a gap buffer and keeps two derived
//! tables in step with every single-codepoint edit:
//!
//! - a line index of per-line lengths (terminator included), used to translate
//!   between offsets and (line, column) positions;
//! - a column index of per-line display widths, used for rendering extents.
//!
//! After each mutation the whole content is re-classified by the document's
//! [`Classifier`] and its highlight spans are replaced.
//!
//! # Example
//!
//! ```
//! use gapedit_buffer::{Document, DocumentSettings};
//!
//! let mut doc = Document::scratch(DocumentSettings::default());
//! doc.insert(0, 'a');
//! doc.insert(1, '\n');
//! assert_eq!(doc.line_lengths(), &[2, 0]);
//!
//! // Deleting removes the codepoint *before* the offset.
//! doc.delete(2);
//! assert_eq!(doc.content(), "a");
//! ```
//!
//! # Offsets
//!
//! All offsets count codepoints in the logical content, which stores a single
//! `'\n'` per line break. The file's CRLF convention, encoding and BOM are
//! restored by [`Document::save`].

mod column_index;
mod document;
mod encoding;
mod gap_buffer;
mod highlight;
mod line_index;
mod types;

pub use column_index::{char_columns, ColumnIndex, DEFAULT_TAB_WIDTH};
pub use document::{Document, DocumentError, DocumentSettings, SCRATCH_NAME};
pub use encoding::{decode, encode, Decoded, Encoding, LineEnding};
pub use gap_buffer::{GapBuffer, DEFAULT_GAP_INCREMENT};
pub use highlight::{
    validate_spans, Classifier, ClassifyError, HighlightCategory, HighlightSpan, LanguageId,
    PlainText,
};
pub use line_index::{is_line_terminator, LineIndex, LineLocation, LINE_TERMINATOR};
pub use types::{Edit, EditKind, Position};
