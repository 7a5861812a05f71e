// Chunk: docs/chunks/view_navigation - Cursor, selection and movement over a shared document
//!
//! A view is a cursor/selection pair plus scroll state over a document.
//!
//! Views never own their document. Every operation takes the document as an
//! argument; the [`Session`](crate::session::Session) looks it up by the view's
//! [`DocumentId`] and keeps other views on the same document in step after an
//! edit.
//!
//! Cursor and selection are logical offsets into the document. The selection is
//! the anchor: `cursor == selection` means nothing is selected. Movement without
//! the extend modifier collapses the selection onto the cursor.
//!
//! `desired_column` is the column vertical movement aims for. Horizontal
//! movement, seeks, edits and explicit placement update it; vertical movement
//! never does, so moving through a short line and back restores the column.

use std::ops::Range;

use gapedit_buffer::{Document, Edit, Position};
use gapedit_input::{Key, KeyEvent, ScrollDelta};

use crate::scroll::ScrollState;
use crate::session::DocumentId;

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Returns true for ASCII punctuation other than `_`, which is part of words.
pub fn is_symbol(ch: char) -> bool {
    ch.is_ascii_punctuation() && ch != '_'
}

/// Word-mode movement stops on whitespace and symbols.
fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || is_symbol(ch)
}

/// Cursor, selection and scroll state over one document.
#[derive(Debug, Clone)]
pub struct View {
    document: DocumentId,
    cursor: usize,
    selection: usize,
    desired_column: usize,
    current_line: usize,
    current_column: usize,
    scroll: ScrollState,
}

impl View {
    /// Creates a view at the start of `document`.
    pub fn new(document: DocumentId, scroll: ScrollState) -> Self {
        Self {
            document,
            cursor: 0,
            selection: 0,
            desired_column: 0,
            current_line: 0,
            current_column: 0,
            scroll,
        }
    }

    // ==================== Accessors ====================

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selection anchor.
    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn desired_column(&self) -> usize {
        self.desired_column
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    pub fn cursor_position(&self) -> Position {
        Position::new(self.current_line, self.current_column)
    }

    pub fn has_selection(&self) -> bool {
        self.cursor != self.selection
    }

    /// Returns the selected range with `start <= end`, or `None` if nothing is
    /// selected.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        if !self.has_selection() {
            return None;
        }
        Some(self.cursor.min(self.selection)..self.cursor.max(self.selection))
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    // ==================== Position bookkeeping ====================

    /// Re-derives line and column from the cursor and keeps the cursor line in
    /// the scroll window.
    ///
    /// Cursor and selection are clamped to the document first, so this is also
    /// how a view recovers after its document shrank underneath it. Calling it
    /// twice without an intervening edit changes nothing.
    pub fn recompute_position(&mut self, doc: &Document) {
        let len = doc.len();
        self.cursor = self.cursor.min(len);
        self.selection = self.selection.min(len);

        let pos = doc.position_of(self.cursor);
        self.current_line = pos.line;
        self.current_column = pos.col;
        self.scroll.follow_line(self.current_line);
    }

    /// Recomputes and remembers the resulting column for vertical movement.
    fn refresh(&mut self, doc: &Document) {
        self.recompute_position(doc);
        self.desired_column = self.current_column;
    }

    fn finish_move(&mut self, doc: &Document, extend: bool, update_desired: bool) {
        if !extend {
            self.selection = self.cursor;
        }
        if update_desired {
            self.refresh(doc);
        } else {
            self.recompute_position(doc);
        }
    }

    // ==================== Movement ====================

    /// Moves one codepoint left or right, or by word when `word_mode` is set.
    ///
    /// Word mode takes one step and then keeps going while the cursor is
    /// strictly inside the document and the codepoint under it is neither
    /// whitespace nor a symbol. At either end of the document this is a no-op.
    pub fn move_horizontal(&mut self, doc: &Document, direction: Direction, word_mode: bool, extend: bool) {
        let len = doc.len();
        match direction {
            Direction::Right => {
                if self.cursor >= len {
                    return;
                }
                self.cursor += 1;
                if word_mode {
                    self.cursor = doc
                        .find_forward(self.cursor..len, is_word_boundary)
                        .unwrap_or(len);
                }
            }
            Direction::Left => {
                if self.cursor == 0 {
                    return;
                }
                self.cursor -= 1;
                if word_mode {
                    self.cursor = doc
                        .find_backward(1..self.cursor + 1, is_word_boundary)
                        .unwrap_or(0);
                }
            }
        }
        self.finish_move(doc, extend, true);
    }

    /// Moves `delta` lines up (negative) or down, aiming for the desired
    /// column and clamping to the target line's content.
    pub fn move_vertical(&mut self, doc: &Document, delta: isize, extend: bool) {
        if doc.is_empty() {
            return;
        }
        let last_line = doc.line_count() - 1;
        let target = self.current_line.saturating_add_signed(delta).min(last_line);
        let column = self.desired_column.min(doc.line_content_length(target));
        self.cursor = doc.line_start_offset(target) + column;
        self.finish_move(doc, extend, false);
    }

    /// Moves by whole pages of `visible_lines`.
    pub fn page(&mut self, doc: &Document, pages: isize, extend: bool) {
        let lines = self.scroll.visible_lines() as isize;
        self.move_vertical(doc, pages.saturating_mul(lines), extend);
    }

    /// Moves to the first column of the current line.
    pub fn seek_line_start(&mut self, doc: &Document, extend: bool) {
        self.cursor -= self.current_column;
        self.finish_move(doc, extend, true);
    }

    /// Moves past the last codepoint of the current line, before its terminator.
    pub fn seek_line_end(&mut self, doc: &Document, extend: bool) {
        let line = self.current_line;
        self.cursor = doc.line_start_offset(line) + doc.line_content_length(line);
        self.finish_move(doc, extend, true);
    }

    /// Places the cursor at `offset` (e.g. a mouse click), clamped to the document.
    pub fn set_cursor(&mut self, doc: &Document, offset: usize, extend: bool) {
        self.cursor = offset.min(doc.len());
        self.finish_move(doc, extend, true);
    }

    /// Places the cursor at a (line, column) position, clamped to the document.
    pub fn set_cursor_position(&mut self, doc: &Document, pos: Position, extend: bool) {
        self.set_cursor(doc, doc.offset_of(pos), extend);
    }

    /// Selects the whole document, leaving the cursor at the end.
    pub fn select_all(&mut self, doc: &Document) {
        self.selection = 0;
        self.cursor = doc.len();
        self.refresh(doc);
    }

    /// Collapses the selection onto the cursor.
    pub fn clear_selection(&mut self) {
        self.selection = self.cursor;
    }

    // ==================== Editing ====================

    /// Inserts `ch` at the cursor and moves past it.
    pub fn insert_char(&mut self, doc: &mut Document, ch: char) -> Edit {
        let edit = doc.insert(self.cursor, ch);
        self.cursor += 1;
        self.selection = self.cursor;
        self.refresh(doc);
        edit
    }

    /// Deletes the codepoint before the cursor (Backspace). No-op at the start.
    pub fn delete_before_cursor(&mut self, doc: &mut Document) -> Option<Edit> {
        let edit = doc.delete(self.cursor)?;
        self.cursor -= 1;
        self.selection = self.cursor;
        self.refresh(doc);
        Some(edit)
    }

    /// Deletes the codepoint under the cursor (Delete). No-op at the end.
    pub fn delete_at_cursor(&mut self, doc: &mut Document) -> Option<Edit> {
        if self.cursor >= doc.len() {
            return None;
        }
        let edit = doc.delete(self.cursor + 1)?;
        self.selection = self.cursor;
        self.refresh(doc);
        Some(edit)
    }

    /// Deletes the selected range and leaves the cursor at its start.
    ///
    /// Returns the single-codepoint edits in the order they were applied.
    pub fn delete_selection(&mut self, doc: &mut Document) -> Vec<Edit> {
        let Some(range) = self.selection_range() else {
            return Vec::new();
        };
        let edits: Vec<Edit> = range.clone().rev().filter_map(|i| doc.delete(i + 1)).collect();
        self.cursor = range.start;
        self.selection = range.start;
        self.refresh(doc);
        edits
    }

    /// Dispatches a key press.
    ///
    /// Arrows move (Control for words, Shift to extend), Home/End seek within
    /// the line, PageUp/PageDown move by a page, Return and Tab insert their
    /// codepoints, Backspace/Delete delete the selection if there is one and a
    /// single codepoint otherwise, and Control+A selects everything. Returns the
    /// edits performed.
    pub fn handle_key(&mut self, doc: &mut Document, event: &KeyEvent) -> Vec<Edit> {
        let extend = event.modifiers.shift;
        let word = event.modifiers.control;

        match event.key {
            Key::Char('a') | Key::Char('A') if event.modifiers.control => {
                self.select_all(doc);
                Vec::new()
            }
            Key::Char(ch) => {
                if event.modifiers.control || event.modifiers.alt || ch.is_control() {
                    Vec::new()
                } else {
                    vec![self.insert_char(doc, ch)]
                }
            }
            Key::Return => vec![self.insert_char(doc, '\n')],
            Key::Tab => vec![self.insert_char(doc, '\t')],
            Key::Backspace => {
                if self.has_selection() {
                    self.delete_selection(doc)
                } else {
                    self.delete_before_cursor(doc).into_iter().collect()
                }
            }
            Key::Delete => {
                if self.has_selection() {
                    self.delete_selection(doc)
                } else {
                    self.delete_at_cursor(doc).into_iter().collect()
                }
            }
            Key::Left => {
                self.move_horizontal(doc, Direction::Left, word, extend);
                Vec::new()
            }
            Key::Right => {
                self.move_horizontal(doc, Direction::Right, word, extend);
                Vec::new()
            }
            Key::Up => {
                self.move_vertical(doc, -1, extend);
                Vec::new()
            }
            Key::Down => {
                self.move_vertical(doc, 1, extend);
                Vec::new()
            }
            Key::Home => {
                self.seek_line_start(doc, extend);
                Vec::new()
            }
            Key::End => {
                self.seek_line_end(doc, extend);
                Vec::new()
            }
            Key::PageUp => {
                self.page(doc, -1, extend);
                Vec::new()
            }
            Key::PageDown => {
                self.page(doc, 1, extend);
                Vec::new()
            }
            Key::Escape => {
                self.clear_selection();
                Vec::new()
            }
        }
    }

    /// Adjusts cursor and selection for an edit made through another view.
    ///
    /// Positions at or after an insertion move right; positions after a
    /// removed codepoint move left. Line, column and desired column are then
    /// re-derived.
    pub fn apply_foreign_edit(&mut self, doc: &Document, edit: &Edit) {
        self.apply_foreign_edits(doc, std::slice::from_ref(edit));
    }

    /// Applies `edits` in the order they were made, then re-derives position.
    pub fn apply_foreign_edits(&mut self, doc: &Document, edits: &[Edit]) {
        for edit in edits {
            self.cursor = edit.shift(self.cursor);
            self.selection = edit.shift(self.selection);
        }
        self.refresh(doc);
    }

    // ==================== Scrolling ====================

    /// Advances the scroll animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.scroll.tick(dt);
    }

    /// Applies a mouse-wheel scroll. The cursor does not move.
    pub fn scroll_by(&mut self, doc: &Document, delta: ScrollDelta) {
        self.scroll.scroll_by(delta.dy, doc.line_count());
    }

    /// Lines to draw at the current scroll offset.
    pub fn visible_lines(&self, doc: &Document) -> Range<usize> {
        self.scroll.visible_range(doc.line_count())
    }
}
