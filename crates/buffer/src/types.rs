// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

/// Position in the document as (line, column) where both are 0-indexed.
///
/// Columns count codepoints from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

/// What a single-element mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Inserted(char),
    Removed(char),
}

/// A single-element mutation.
///
/// For an insert, `offset` is where the new element now lives. For a removal,
/// `offset` is where the removed element used to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub offset: usize,
    pub kind: EditKind,
}

impl Edit {
    pub fn inserted(offset: usize, ch: char) -> Self {
        Self {
            offset,
            kind: EditKind::Inserted(ch),
        }
    }

    pub fn removed(offset: usize, ch: char) -> Self {
        Self {
            offset,
            kind: EditKind::Removed(ch),
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self.kind, EditKind::Inserted(_))
    }

    /// Maps an offset that was valid before this edit to the same logical
    /// location after it.
    ///
    /// Offsets at or after an insertion point move right; offsets strictly
    /// after a removed element move left.
    pub fn shift(&self, pos: usize) -> usize {
        match self.kind {
            EditKind::Inserted(_) if pos >= self.offset => pos + 1,
            EditKind::Removed(_) if pos > self.offset => pos - 1,
            _ => pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert_eq!(Position::new(1, 1).cmp(&Position::new(1, 1)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_shift_after_insert() {
        let edit = Edit::inserted(4, 'x');
        assert_eq!(edit.shift(3), 3);
        assert_eq!(edit.shift(4), 5);
        assert_eq!(edit.shift(10), 11);
    }

    #[test]
    fn test_shift_after_remove() {
        let edit = Edit::removed(4, 'x');
        assert_eq!(edit.shift(4), 4);
        assert_eq!(edit.shift(5), 4);
        assert_eq!(edit.shift(2), 2);
    }
}
