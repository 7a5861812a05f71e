// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes
// Chunk: docs/chunks/tokenizer_trigger - Full re-tokenization after every mutation

//! Document is the editable unit: one per open file.
//!
//! It owns the gap buffer together with the derived line and column indexes and
//! keeps all three in step on every single-element edit. After each mutation the
//! whole content is handed to the document's [`Classifier`] and the highlight
//! spans are replaced wholesale.
//!
//! Documents store one `'\n'` per line break regardless of the file's
//! convention. Encoding, line ending and BOM are detected on load and re-applied
//! on save.

use std::fmt;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use thiserror::Error;

use crate::column_index::{char_columns, ColumnIndex, DEFAULT_TAB_WIDTH};
use crate::encoding::{self, Encoding, LineEnding};
use crate::gap_buffer::{GapBuffer, DEFAULT_GAP_INCREMENT};
use crate::highlight::{validate_spans, Classifier, HighlightSpan, LanguageId, PlainText};
use crate::line_index::{is_line_terminator, LineIndex};
use crate::types::{Edit, Position};

/// Name given to documents that have no backing file.
pub const SCRATCH_NAME: &str = "*scratch*";

/// Errors from reading or writing a document's backing file.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document '{0}' has no backing file")]
    NoPath(String),
}

/// Tunables applied when a document is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSettings {
    /// Slots the gap buffer grows by when it runs out.
    pub gap_increment: usize,
    /// Columns a tab occupies in the column index.
    pub tab_width: usize,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            gap_increment: DEFAULT_GAP_INCREMENT,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// An open document.
pub struct Document {
    storage: GapBuffer,
    lines: LineIndex,
    columns: ColumnIndex,
    encoding: Encoding,
    line_ending: LineEnding,
    bom: bool,
    language: LanguageId,
    classifier: Rc<dyn Classifier>,
    spans: Vec<HighlightSpan>,
    /// The last classification failed; `spans` belong to an older revision.
    highlight_stale: bool,
    dirty: bool,
    revision: u64,
    name: String,
    path: Option<PathBuf>,
}

impl Document {
    /// Creates an empty, unnamed document.
    pub fn scratch(settings: DocumentSettings) -> Self {
        Self::from_decoded(
            encoding::decode(&[]),
            settings,
            LanguageId::plain(),
            SCRATCH_NAME.to_owned(),
        )
    }

    /// Creates a document from raw file bytes.
    ///
    /// Loading cannot fail: bytes that are not valid UTF-8 are read as ANSI.
    pub fn load(name: impl Into<String>, bytes: &[u8], settings: DocumentSettings) -> Self {
        let name = name.into();
        let language = LanguageId::from_path(Path::new(&name));
        let doc = Self::from_decoded(encoding::decode(bytes), settings, language, name);
        log::debug!(
            "loaded '{}': {} codepoints, {} lines, {}, {}",
            doc.name,
            doc.len(),
            doc.line_count(),
            doc.encoding,
            doc.line_ending
        );
        doc
    }

    /// Reads and loads the file at `path`.
    pub fn open(path: impl AsRef<Path>, settings: DocumentSettings) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut doc = Self::load(name, &bytes, settings);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    fn from_decoded(
        decoded: encoding::Decoded,
        settings: DocumentSettings,
        language: LanguageId,
        name: String,
    ) -> Self {
        let storage = GapBuffer::from_chars(decoded.text.chars(), settings.gap_increment);
        let mut lines = LineIndex::new();
        lines.rebuild(decoded.text.chars());
        let mut columns = ColumnIndex::new(settings.tab_width);
        columns.rebuild(decoded.text.chars());

        let mut doc = Self {
            storage,
            lines,
            columns,
            encoding: decoded.encoding,
            line_ending: decoded.line_ending,
            bom: decoded.bom,
            language,
            classifier: Rc::new(PlainText),
            spans: Vec::new(),
            highlight_stale: false,
            dirty: false,
            revision: 0,
            name,
            path: None,
        };
        doc.retokenize();
        doc
    }

    // ==================== Configuration ====================

    /// Replaces the classifier and re-tokenizes.
    pub fn set_classifier(&mut self, classifier: Rc<dyn Classifier>) {
        self.classifier = classifier;
        self.retokenize();
    }

    /// Changes the language and re-tokenizes.
    pub fn set_language(&mut self, language: LanguageId) {
        self.language = language;
        self.retokenize();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ==================== Accessors ====================

    /// Number of codepoints in the document.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Per-line lengths, terminators included.
    pub fn line_lengths(&self) -> &[usize] {
        self.lines.lengths()
    }

    /// Per-line display widths.
    pub fn line_widths(&self) -> &[usize] {
        self.columns.columns()
    }

    pub fn line_start_offset(&self, line: usize) -> usize {
        self.lines.line_start_offset(line)
    }

    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.lines.line_of_offset(offset)
    }

    /// Length of `line` including its terminator.
    pub fn line_length(&self, line: usize) -> usize {
        self.lines.line_length(line)
    }

    /// Length of `line` excluding its terminator.
    pub fn line_content_length(&self, line: usize) -> usize {
        self.lines.content_length(line)
    }

    /// Display width of `line` in columns.
    pub fn line_columns(&self, line: usize) -> usize {
        self.columns.line_columns(line)
    }

    /// Display column at which the codepoint at `offset` is drawn.
    pub fn display_column(&self, offset: usize) -> usize {
        let line = self.line_of_offset(offset);
        let start = self.line_start_offset(line);
        let tab_width = self.columns.tab_width();
        self.storage
            .chars_in(start..offset)
            .map(|ch| char_columns(ch, tab_width))
            .sum()
    }

    /// Returns the codepoint at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len()`.
    pub fn char_at(&self, offset: usize) -> char {
        self.storage.read(offset)
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.storage.chars()
    }

    /// Full content with `'\n'` line breaks.
    pub fn content(&self) -> String {
        self.storage.to_string()
    }

    /// Content of `line` without its terminator.
    pub fn line_content(&self, line: usize) -> String {
        let start = self.line_start_offset(line);
        self.storage.slice(start..start + self.line_content_length(line))
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        self.storage.slice(range)
    }

    /// First offset in `range` whose codepoint satisfies `pred`.
    pub fn find_forward<P>(&self, range: Range<usize>, pred: P) -> Option<usize>
    where
        P: FnMut(char) -> bool,
    {
        self.storage.find(range, pred)
    }

    /// Last offset in `range` whose codepoint satisfies `pred`.
    pub fn find_backward<P>(&self, range: Range<usize>, pred: P) -> Option<usize>
    where
        P: FnMut(char) -> bool,
    {
        self.storage.rfind(range, pred)
    }

    /// Converts an offset into a (line, column) position.
    pub fn position_of(&self, offset: usize) -> Position {
        let location = self.lines.locate(offset);
        Position::new(location.line, offset - location.start)
    }

    /// Converts a position into an offset, clamping the line to the document and
    /// the column to the line's content.
    pub fn offset_of(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count() - 1);
        self.line_start_offset(line) + pos.col.min(self.line_content_length(line))
    }

    pub fn highlight_spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    /// True when the last classification failed and the spans are out of date.
    pub fn is_highlight_stale(&self) -> bool {
        self.highlight_stale
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mutation counter; bumps on every successful edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Times the gap buffer has grown since the document was created.
    pub fn reallocations(&self) -> usize {
        self.storage.reallocations()
    }

    // ==================== Mutations ====================

    /// Inserts `ch` at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn insert(&mut self, offset: usize, ch: char) -> Edit {
        let len = self.len();
        assert!(offset <= len, "insert at {} out of bounds (len {})", offset, len);

        self.storage.insert(offset, ch);
        let terminator = is_line_terminator(ch);
        let at = self.lines.insert(offset, terminator);
        if terminator {
            let tab_width = self.columns.tab_width();
            let prefix = self
                .storage
                .chars_in(at.start..offset)
                .map(|c| char_columns(c, tab_width))
                .sum();
            self.columns.split(at.line, prefix);
        } else {
            self.columns.grow(at.line, ch);
        }

        self.after_mutation();
        Edit::inserted(offset, ch)
    }

    /// Deletes the codepoint immediately preceding `offset`.
    ///
    /// Returns `None` at offset 0, where nothing precedes.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn delete(&mut self, offset: usize) -> Option<Edit> {
        let len = self.len();
        assert!(offset <= len, "delete at {} out of bounds (len {})", offset, len);

        let ch = self.storage.remove(offset)?;
        let removed_at = offset - 1;
        let terminator = is_line_terminator(ch);
        let at = self.lines.remove(removed_at, terminator);
        if terminator {
            self.columns.merge(at.line);
        } else {
            self.columns.shrink(at.line, ch);
        }

        self.after_mutation();
        Some(Edit::removed(removed_at, ch))
    }

    fn after_mutation(&mut self) {
        self.dirty = true;
        self.revision += 1;
        self.assert_indexes_consistent();
        self.retokenize();
    }

    // ==================== Highlighting ====================

    /// Runs the classifier over the whole content and replaces the spans.
    ///
    /// On failure the previous spans are kept, clipped to the current length,
    /// and the document is marked stale until a later run succeeds.
    pub fn retokenize(&mut self) {
        let started = Instant::now();
        let content = self.content();
        let len = self.len();

        let result = self
            .classifier
            .classify(&content, &self.language)
            .and_then(|spans| validate_spans(&spans, len).map(|_| spans));

        match result {
            Ok(spans) => {
                if self.highlight_stale {
                    log::debug!("highlighting for '{}' recovered", self.name);
                }
                self.spans = spans;
                self.highlight_stale = false;
            }
            Err(err) => {
                if !self.highlight_stale {
                    log::warn!("highlighting for '{}' is stale: {}", self.name, err);
                }
                self.highlight_stale = true;
                clip_spans(&mut self.spans, len);
            }
        }

        log::trace!(
            "retokenized '{}' ({} codepoints, {} spans) in {:?}",
            self.name,
            len,
            self.spans.len(),
            started.elapsed()
        );
    }

    // ==================== Saving ====================

    /// Encodes the content with the document's encoding, line ending and BOM.
    pub fn to_bytes(&self) -> Vec<u8> {
        encoding::encode(self.storage.chars(), self.encoding, self.line_ending, self.bom)
    }

    /// Encodes the content and clears the dirty flag.
    pub fn save(&mut self) -> Vec<u8> {
        let bytes = self.to_bytes();
        self.dirty = false;
        bytes
    }

    /// Writes the content back to the backing file.
    pub fn save_to_path(&mut self) -> Result<(), DocumentError> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| DocumentError::NoPath(self.name.clone()))?;
        self.write_to(&path)
    }

    /// Writes the content to `path` and makes it the backing file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref().to_path_buf();
        self.write_to(&path)?;
        if let Some(name) = path.file_name() {
            self.name = name.to_string_lossy().into_owned();
        }
        self.path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        let bytes = self.to_bytes();
        std::fs::write(path, &bytes).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.dirty = false;
        log::debug!("saved '{}' ({} bytes) to {}", self.name, bytes.len(), path.display());
        Ok(())
    }

    // ==================== Validation ====================

    /// Debug assertion: the incremental indexes match a fresh rebuild.
    ///
    /// Checks every 64th mutation; compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_indexes_consistent(&self) {
        if self.revision % 64 != 0 {
            return;
        }
        let mut expected_lines = LineIndex::new();
        expected_lines.rebuild(self.storage.chars());
        assert_eq!(
            self.lines.lengths(),
            expected_lines.lengths(),
            "line index drift detected at revision {}",
            self.revision
        );
        let mut expected_columns = ColumnIndex::new(self.columns.tab_width());
        expected_columns.rebuild(self.storage.chars());
        assert_eq!(
            self.columns.columns(),
            expected_columns.columns(),
            "column index drift detected at revision {}",
            self.revision
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_indexes_consistent(&self) {}
}

/// Drops spans that start past `len` and truncates the one straddling it.
fn clip_spans(spans: &mut Vec<HighlightSpan>, len: usize) {
    spans.retain(|span| span.offset < len);
    if let Some(last) = spans.last_mut() {
        last.length = last.length.min(len - last.offset);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("len", &self.len())
            .field("line_lengths", &self.lines.lengths())
            .field("encoding", &self.encoding)
            .field("line_ending", &self.line_ending)
            .field("language", &self.language)
            .field("spans", &self.spans.len())
            .field("highlight_stale", &self.highlight_stale)
            .field("dirty", &self.dirty)
            .field("revision", &self.revision)
            .finish()
    }
}
