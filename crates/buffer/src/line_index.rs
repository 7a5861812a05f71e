// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

//! Line index tracking the length of every line.
//!
//! The index stores, for each line, its length in codepoints *including* the line
//! terminator. The trailing line is never terminated and may be empty. This
//! representation makes single-element edits cheap to patch: an ordinary insert
//! or delete touches one entry, a newline insert splits one entry in two, and a
//! newline delete merges two entries into one.
//!
//! Locating the line that owns an offset is a linear scan of the table. The index
//! remembers the last line it touched so that repeated edits on the same line
//! (typing) resume the scan there instead of starting from line 0.

/// The line terminator stored in documents.
pub const LINE_TERMINATOR: char = '\n';

/// Returns true if `ch` ends a line.
pub fn is_line_terminator(ch: char) -> bool {
    ch == LINE_TERMINATOR
}

/// A line together with the offset at which it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineLocation {
    pub line: usize,
    pub start: usize,
}

/// Per-line length table.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Length of each line including its terminator. Never empty.
    line_lengths: Vec<usize>,
    /// Sum of `line_lengths`.
    total: usize,
    /// Last line touched by a mutation. Its start offset is still exact because
    /// edits only ever move the starts of lines after the edited one.
    hint: LineLocation,
}

impl LineIndex {
    /// Creates an index for an empty document: one line of length 0.
    pub fn new() -> Self {
        Self {
            line_lengths: vec![0],
            total: 0,
            hint: LineLocation::default(),
        }
    }

    /// Rebuilds the index from the given content in one linear pass.
    ///
    /// Used for bulk loads; interactive edits go through `insert`/`remove`.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_lengths.clear();
        self.total = 0;
        self.hint = LineLocation::default();

        let mut current = 0;
        for ch in content {
            current += 1;
            self.total += 1;
            if is_line_terminator(ch) {
                self.line_lengths.push(current);
                current = 0;
            }
        }
        self.line_lengths.push(current);
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    /// Returns the total number of codepoints covered by the index.
    pub fn total_length(&self) -> usize {
        self.total
    }

    /// Returns the raw per-line lengths.
    pub fn lengths(&self) -> &[usize] {
        &self.line_lengths
    }

    /// Returns the length of `line`, terminator included.
    ///
    /// # Panics
    ///
    /// Panics if `line >= line_count()`.
    pub fn line_length(&self, line: usize) -> usize {
        self.check_line(line);
        self.line_lengths[line]
    }

    /// Returns the length of `line` without its terminator.
    ///
    /// Every line except the last one is terminated.
    pub fn content_length(&self, line: usize) -> usize {
        let len = self.line_length(line);
        if line + 1 < self.line_count() {
            len - 1
        } else {
            len
        }
    }

    /// Returns the offset at which `line` starts (prefix sum of preceding lengths).
    ///
    /// # Panics
    ///
    /// Panics if `line >= line_count()`.
    pub fn line_start_offset(&self, line: usize) -> usize {
        self.check_line(line);
        let (from, base) = if line >= self.hint.line {
            (self.hint.line, self.hint.start)
        } else {
            (0, 0)
        };
        base + self.line_lengths[from..line].iter().sum::<usize>()
    }

    /// Returns the line containing `offset`.
    ///
    /// An offset equal to the start of a line belongs to that line; the end of the
    /// document belongs to the last line.
    ///
    /// # Panics
    ///
    /// Panics if `offset > total_length()`.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.locate(offset).line
    }

    /// Returns the line containing `offset` together with that line's start.
    ///
    /// # Panics
    ///
    /// Panics if `offset > total_length()`.
    pub fn locate(&self, offset: usize) -> LineLocation {
        assert!(
            offset <= self.total,
            "offset {} out of bounds (len {})",
            offset,
            self.total
        );

        let mut at = if offset >= self.hint.start {
            self.hint
        } else {
            LineLocation::default()
        };
        let last = self.line_lengths.len() - 1;
        while at.line < last {
            let len = self.line_lengths[at.line];
            if offset < at.start + len {
                break;
            }
            at.start += len;
            at.line += 1;
        }
        at
    }

    /// Records the insertion of one element at `offset`.
    ///
    /// A terminator splits the owning line: the line keeps everything before
    /// `offset` plus the new terminator, and a new line holding the remainder is
    /// inserted right after it. Returns the owning line.
    pub fn insert(&mut self, offset: usize, is_terminator: bool) -> LineLocation {
        let at = self.locate(offset);
        let column = offset - at.start;

        if is_terminator {
            let len = self.line_lengths[at.line];
            self.line_lengths[at.line] = column + 1;
            self.line_lengths.insert(at.line + 1, len - column);
        } else {
            self.line_lengths[at.line] += 1;
        }

        self.total += 1;
        self.hint = at;
        at
    }

    /// Records the removal of the element that was at `offset`.
    ///
    /// Removing a terminator merges its line with the following one. Returns the
    /// line that owned the removed element.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= total_length()`.
    pub fn remove(&mut self, offset: usize, was_terminator: bool) -> LineLocation {
        assert!(
            offset < self.total,
            "remove at {} out of bounds (len {})",
            offset,
            self.total
        );
        let at = self.locate(offset);

        self.line_lengths[at.line] -= 1;
        if was_terminator && at.line + 1 < self.line_lengths.len() {
            let next = self.line_lengths.remove(at.line + 1);
            self.line_lengths[at.line] += next;
        }

        self.total -= 1;
        self.hint = at;
        at
    }

    fn check_line(&self, line: usize) {
        assert!(
            line < self.line_lengths.len(),
            "line {} out of bounds (line count {})",
            line,
            self.line_lengths.len()
        );
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
