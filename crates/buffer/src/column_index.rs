// Chunk: docs/chunks/column_index - Display width per line for rendering

//! Per-line display widths.
//!
//! The renderer needs to know how many columns a line occupies (tabs expanded,
//! wide characters counted twice) without walking the line. This table is kept
//! next to the [`LineIndex`](crate::line_index::LineIndex) and patched by the
//! same edits.
//!
//! Widths are additive: a line's width is the sum of its characters' widths, and
//! terminators have width 0. Merging two lines therefore just adds their widths;
//! only a split needs the width of the prefix before the split point.

use unicode_width::UnicodeWidthChar;

use crate::line_index::is_line_terminator;

/// Default number of columns a tab occupies.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Returns the number of display columns `ch` occupies.
///
/// Control characters other than tab and the terminator render as a single
/// replacement glyph.
pub fn char_columns(ch: char, tab_width: usize) -> usize {
    if is_line_terminator(ch) {
        0
    } else if ch == '\t' {
        tab_width
    } else {
        ch.width().unwrap_or(1)
    }
}

/// Table of display widths, one entry per line.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    line_columns: Vec<usize>,
    tab_width: usize,
}

impl ColumnIndex {
    pub fn new(tab_width: usize) -> Self {
        Self {
            line_columns: vec![0],
            tab_width,
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Rebuilds the table from the full content.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_columns.clear();
        let mut current = 0;
        for ch in content {
            if is_line_terminator(ch) {
                self.line_columns.push(current);
                current = 0;
            } else {
                current += char_columns(ch, self.tab_width);
            }
        }
        self.line_columns.push(current);
    }

    pub fn line_count(&self) -> usize {
        self.line_columns.len()
    }

    /// Returns the display width of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of bounds.
    pub fn line_columns(&self, line: usize) -> usize {
        self.line_columns[line]
    }

    /// Returns the widest line, used for horizontal scroll extents.
    pub fn max_columns(&self) -> usize {
        self.line_columns.iter().copied().max().unwrap_or(0)
    }

    pub fn columns(&self) -> &[usize] {
        &self.line_columns
    }

    /// Accounts for `ch` being inserted into `line`.
    pub fn grow(&mut self, line: usize, ch: char) {
        self.line_columns[line] += char_columns(ch, self.tab_width);
    }

    /// Accounts for `ch` being removed from `line`.
    pub fn shrink(&mut self, line: usize, ch: char) {
        self.line_columns[line] -= char_columns(ch, self.tab_width);
    }

    /// Splits `line` after `prefix_columns` columns.
    pub fn split(&mut self, line: usize, prefix_columns: usize) {
        let total = self.line_columns[line];
        self.line_columns[line] = prefix_columns;
        self.line_columns.insert(line + 1, total - prefix_columns);
    }

    /// Joins `line` with the line that follows it.
    pub fn merge(&mut self, line: usize) {
        if line + 1 < self.line_columns.len() {
            let next = self.line_columns.remove(line + 1);
            self.line_columns[line] += next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(text: &str) -> ColumnIndex {
        let mut index = ColumnIndex::new(DEFAULT_TAB_WIDTH);
        index.rebuild(text.chars());
        index
    }

    #[test]
    fn test_char_columns() {
        assert_eq!(char_columns('a', 4), 1);
        assert_eq!(char_columns('\t', 4), 4);
        assert_eq!(char_columns('\t', 8), 8);
        assert_eq!(char_columns('\n', 4), 0);
        assert_eq!(char_columns('界', 4), 2);
        assert_eq!(char_columns('\u{7}', 4), 1);
    }

    #[test]
    fn test_rebuild() {
        let index = index("ab\n\tx\n界");
        assert_eq!(index.columns(), &[2, 5, 2]);
        assert_eq!(index.max_columns(), 5);
    }

    #[test]
    fn test_split_and_merge() {
        let mut index = index("hello\tworld");
        assert_eq!(index.columns(), &[14]);
        index.split(0, 5);
        assert_eq!(index.columns(), &[5, 9]);
        index.merge(0);
        assert_eq!(index.columns(), &[14]);
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut index = index("a\nb");
        index.grow(1, '\t');
        assert_eq!(index.line_columns(1), 5);
        index.shrink(1, '\t');
        assert_eq!(index.line_columns(1), 1);
    }
}
