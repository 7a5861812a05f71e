// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

//! Gap buffer storage for document codepoints.
//!
//! A gap buffer is a character array with a movable run of unused slots (the gap)
//! parked at the last edit position. Insertions and deletions at the gap are O(1);
//! moving the gap is O(distance) and only copies the elements that lie between the
//! old and the new gap position.
//!
//! Callers address the buffer with *logical* offsets, as if the gap did not exist.
//! The private [`Gap`] type is the only place where logical offsets are mapped to
//! physical slots of the backing `Vec`.

use std::fmt;
use std::ops::Range;

/// Number of slots added to the gap each time it runs out.
pub const DEFAULT_GAP_INCREMENT: usize = 64;

/// Value written into unused slots. Never observable through the public API.
const FILL: char = '\0';

/// Position and size of the gap inside the backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gap {
    /// First unused slot.
    start: usize,
    /// Number of unused slots.
    len: usize,
}

impl Gap {
    /// First used slot after the gap.
    fn end(self) -> usize {
        self.start + self.len
    }

    /// Maps a logical offset to the physical slot holding that element.
    ///
    /// Offsets at or past the gap start land after the gap, so
    /// `logical_to_physical(len)` is one past the last used slot.
    fn logical_to_physical(self, index: usize) -> usize {
        if index < self.start {
            index
        } else {
            index + self.len
        }
    }

    /// Maps a used physical slot back to its logical offset.
    fn physical_to_logical(self, slot: usize) -> usize {
        debug_assert!(
            slot < self.start || slot >= self.end(),
            "slot {} lies inside the gap {:?}",
            slot,
            self
        );
        if slot < self.start {
            slot
        } else {
            slot - self.len
        }
    }

    /// Splits a logical range into the physical slot ranges before and after the gap.
    fn physical_segments(self, range: Range<usize>) -> [Range<usize>; 2] {
        let head = range.start.min(self.start)..range.end.min(self.start);
        let tail = self.logical_to_physical(range.start.max(self.start))
            ..self.logical_to_physical(range.end.max(self.start));
        [head, tail]
    }
}

/// A gap buffer of codepoints.
///
/// The buffer grows by a fixed increment whenever an insertion finds the gap
/// empty. Growth only changes the physical layout; logical offsets and content
/// are unaffected.
#[derive(Debug)]
pub struct GapBuffer {
    /// Backing storage: [pre-gap content | gap | post-gap content].
    data: Vec<char>,
    gap: Gap,
    /// Slots added per growth.
    gap_increment: usize,
    /// Number of times the storage has been grown.
    reallocations: usize,
}

impl GapBuffer {
    /// Creates an empty buffer with the default gap increment.
    pub fn new() -> Self {
        Self::with_gap_increment(DEFAULT_GAP_INCREMENT)
    }

    /// Creates an empty buffer whose initial gap and growth step are `gap_increment`.
    pub fn with_gap_increment(gap_increment: usize) -> Self {
        let gap_increment = gap_increment.max(1);
        Self {
            data: vec![FILL; gap_increment],
            gap: Gap {
                start: 0,
                len: gap_increment,
            },
            gap_increment,
            reallocations: 0,
        }
    }

    /// Builds a buffer from a sequence of codepoints in one pass.
    ///
    /// This is the bulk-load path: content is written contiguously and the gap is
    /// placed at the end, so no per-element gap movement happens.
    pub fn from_chars<I>(chars: I, gap_increment: usize) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let gap_increment = gap_increment.max(1);
        let mut data: Vec<char> = chars.into_iter().collect();
        let len = data.len();
        data.resize(len + gap_increment, FILL);
        Self {
            data,
            gap: Gap {
                start: len,
                len: gap_increment,
            },
            gap_increment,
            reallocations: 0,
        }
    }

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap.len
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated slots, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns how many times the storage has been grown.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Returns the logical offset the gap currently sits at.
    pub fn gap_position(&self) -> usize {
        self.gap.start
    }

    /// Returns the element at logical `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn read(&self, index: usize) -> char {
        let len = self.len();
        assert!(index < len, "read at {index} out of bounds (len {len})");
        self.data[self.gap.logical_to_physical(index)]
    }

    /// Inserts `ch` so that it ends up at logical `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, ch: char) {
        let len = self.len();
        assert!(index <= len, "insert at {index} out of bounds (len {len})");

        if self.gap.len == 0 {
            self.grow();
        }
        self.move_gap_to(index);

        self.data[self.gap.start] = ch;
        self.gap.start += 1;
        self.gap.len -= 1;
    }

    /// Deletes the element immediately preceding `index` and returns it.
    ///
    /// `remove(0)` is a no-op returning `None`: nothing precedes the start.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn remove(&mut self, index: usize) -> Option<char> {
        let len = self.len();
        assert!(index <= len, "remove at {index} out of bounds (len {len})");

        if index == 0 {
            return None;
        }
        self.move_gap_to(index);

        self.gap.start -= 1;
        self.gap.len += 1;
        Some(self.data[self.gap.start])
    }

    /// Moves the gap so that it starts at logical `index`.
    ///
    /// Only the elements between the old and new gap position are copied.
    fn move_gap_to(&mut self, index: usize) {
        let gap = self.gap;
        if index < gap.start {
            let shift = gap.start - index;
            self.data.copy_within(index..gap.start, gap.end() - shift);
        } else if index > gap.start {
            let shift = index - gap.start;
            self.data.copy_within(gap.end()..gap.end() + shift, gap.start);
        }
        self.gap.start = index;
    }

    /// Grows the gap in place by `gap_increment` slots.
    ///
    /// The gap start is preserved; post-gap content is shifted to the new end.
    fn grow(&mut self) {
        let old_len = self.data.len();
        let old_gap_end = self.gap.end();

        self.data.reserve_exact(self.gap_increment);
        self.data.resize(old_len + self.gap_increment, FILL);
        self.data
            .copy_within(old_gap_end..old_len, old_gap_end + self.gap_increment);

        self.gap.len += self.gap_increment;
        self.reallocations += 1;
        log::trace!(
            "gap buffer grown to {} slots ({} reallocations)",
            self.data.len(),
            self.reallocations
        );
    }

    /// Returns an iterator over all elements in logical order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap.start]
            .iter()
            .chain(self.data[self.gap.end()..].iter())
            .copied()
    }

    /// Returns an iterator over the elements of a logical range.
    ///
    /// The range is clamped to the buffer length.
    pub fn chars_in(&self, range: Range<usize>) -> impl Iterator<Item = char> + '_ {
        let [head, tail] = self.gap.physical_segments(self.clamp(range));
        self.data[head].iter().chain(self.data[tail].iter()).copied()
    }

    /// Returns the content of a logical range as a `String`.
    pub fn slice(&self, range: Range<usize>) -> String {
        self.chars_in(range).collect()
    }

    /// Returns the first logical offset in `range` whose element satisfies `pred`.
    pub fn find<P>(&self, range: Range<usize>, mut pred: P) -> Option<usize>
    where
        P: FnMut(char) -> bool,
    {
        let gap = self.gap;
        gap.physical_segments(self.clamp(range))
            .into_iter()
            .find_map(|segment| {
                self.data[segment.clone()]
                    .iter()
                    .position(|&ch| pred(ch))
                    .map(|i| gap.physical_to_logical(segment.start + i))
            })
    }

    /// Returns the last logical offset in `range` whose element satisfies `pred`.
    pub fn rfind<P>(&self, range: Range<usize>, mut pred: P) -> Option<usize>
    where
        P: FnMut(char) -> bool,
    {
        let gap = self.gap;
        gap.physical_segments(self.clamp(range))
            .into_iter()
            .rev()
            .find_map(|segment| {
                self.data[segment.clone()]
                    .iter()
                    .rposition(|&ch| pred(ch))
                    .map(|i| gap.physical_to_logical(segment.start + i))
            })
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let end = range.end.min(len);
        range.start.min(end)..end
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> GapBuffer {
        GapBuffer::from_chars(text.chars(), DEFAULT_GAP_INCREMENT)
    }

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), DEFAULT_GAP_INCREMENT);
    }

    #[test]
    fn test_from_chars() {
        let buf = buffer("hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.to_string(), "hello");
        assert_eq!(buf.gap_position(), 5);
    }

    #[test]
    fn test_insert_sequential() {
        let mut buf = GapBuffer::new();
        buf.insert(0, 'a');
        buf.insert(1, 'b');
        buf.insert(2, 'c');
        assert_eq!(buf.to_string(), "abc");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_insert_at_middle() {
        let mut buf = buffer("ac");
        buf.insert(1, 'b');
        assert_eq!(buf.to_string(), "abc");
        assert_eq!(buf.gap_position(), 2);
    }

    #[test]
    fn test_insert_at_start_after_gap_moved_right() {
        let mut buf = buffer("bcd");
        buf.insert(3, 'e');
        buf.insert(0, 'a');
        assert_eq!(buf.to_string(), "abcde");
    }

    #[test]
    fn test_remove_deletes_preceding_element() {
        let mut buf = buffer("abc");
        assert_eq!(buf.remove(3), Some('c'));
        assert_eq!(buf.to_string(), "ab");
        assert_eq!(buf.remove(1), Some('a'));
        assert_eq!(buf.to_string(), "b");
    }

    #[test]
    fn test_remove_at_start_is_noop() {
        let mut buf = buffer("abc");
        assert_eq!(buf.remove(0), None);
        assert_eq!(buf.to_string(), "abc");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_remove_in_middle() {
        let mut buf = buffer("abcdef");
        assert_eq!(buf.remove(4), Some('d'));
        assert_eq!(buf.to_string(), "abcef");
        assert_eq!(buf.gap_position(), 3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_read_past_end_panics() {
        let buf = buffer("abc");
        buf.read(3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_insert_past_end_panics() {
        let mut buf = buffer("abc");
        buf.insert(4, 'x');
    }

    #[test]
    fn test_read_with_gap_in_middle() {
        let mut buf = buffer("hllo");
        buf.insert(1, 'e');
        assert_eq!(buf.gap_position(), 2);
        let read: String = (0..buf.len()).map(|i| buf.read(i)).collect();
        assert_eq!(read, "hello");
    }

    #[test]
    fn test_growth_preserves_content() {
        let mut buf = GapBuffer::with_gap_increment(4);
        for (i, ch) in "abcd".chars().enumerate() {
            buf.insert(i, ch);
        }
        assert_eq!(buf.reallocations(), 0);
        // Gap is now full; inserting in the middle must grow without moving content.
        buf.insert(2, 'X');
        assert_eq!(buf.reallocations(), 1);
        assert_eq!(buf.to_string(), "abXcd");
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_typing_reallocates_once_per_increment() {
        let increment = 16;
        let mut buf = GapBuffer::with_gap_increment(increment);
        // Initial gap absorbs the first `increment` inserts; one growth covers the next batch.
        for i in 0..(2 * increment) {
            buf.insert(i, 'x');
        }
        assert_eq!(buf.reallocations(), 1);
        buf.insert(buf.len(), 'y');
        assert_eq!(buf.reallocations(), 2);
    }

    #[test]
    fn test_slice_across_gap() {
        let mut buf = buffer("hello world");
        buf.insert(5, ',');
        assert_eq!(buf.slice(0..6), "hello,");
        assert_eq!(buf.slice(4..9), "o, wo");
        assert_eq!(buf.slice(7..100), "world");
        assert_eq!(buf.slice(9..3), "");
    }

    #[test]
    fn test_find_across_gap() {
        let mut buf = buffer("foo bar baz");
        buf.insert(4, '_');
        // "foo _bar baz"
        assert_eq!(buf.find(0..buf.len(), |c| c == ' '), Some(3));
        assert_eq!(buf.find(4..buf.len(), |c| c == ' '), Some(8));
        assert_eq!(buf.find(9..buf.len(), |c| c == ' '), None);
    }

    #[test]
    fn test_rfind_across_gap() {
        let mut buf = buffer("foo bar baz");
        buf.insert(6, '!');
        // "foo ba!r baz"
        assert_eq!(buf.rfind(0..buf.len(), |c| c == ' '), Some(8));
        assert_eq!(buf.rfind(0..8, |c| c == ' '), Some(3));
        assert_eq!(buf.rfind(0..3, |c| c == ' '), None);
    }

    #[test]
    fn test_gap_mapping_round_trips() {
        let gap = Gap { start: 3, len: 5 };
        for logical in [0, 2, 3, 7] {
            let slot = gap.logical_to_physical(logical);
            assert_eq!(gap.physical_to_logical(slot), logical);
        }
        assert_eq!(gap.logical_to_physical(3), 8);
    }
}
