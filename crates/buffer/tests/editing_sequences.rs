// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

//! Integration tests for realistic editing sequences.
//!
//! These tests verify that the gap buffer, line index and column index stay in
//! sync through editing patterns that move the gap around the document.

use gapedit_buffer::{Document, DocumentSettings, Edit, Position};

fn scratch() -> Document {
    Document::scratch(DocumentSettings::default())
}

fn type_str(doc: &mut Document, mut offset: usize, text: &str) -> usize {
    for ch in text.chars() {
        doc.insert(offset, ch);
        offset += 1;
    }
    offset
}

#[test]
fn test_type_word_then_delete_entirely() {
    let mut doc = scratch();
    let end = type_str(&mut doc, 0, "hello");
    assert_eq!(doc.content(), "hello");
    assert_eq!(doc.position_of(end), Position::new(0, 5));

    for offset in (1..=5).rev() {
        doc.delete(offset);
    }
    assert!(doc.is_empty());
    assert_eq!(doc.line_lengths(), &[0]);
}

#[test]
fn test_type_multiple_lines_and_edit_middle() {
    let mut doc = scratch();
    type_str(&mut doc, 0, "first line\nsecond line\nthird line");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.line_content(1), "second line");

    let at = doc.offset_of(Position::new(1, 7));
    type_str(&mut doc, at, "awesome ");
    assert_eq!(doc.line_content(1), "second awesome line");
    assert_eq!(doc.line_lengths(), &[11, 20, 10]);
    assert_eq!(doc.line_start_offset(2), 31);
}

#[test]
fn test_edits_jumping_between_distant_lines() {
    let mut doc = Document::load("t.txt", b"aaaa\nbbbb\ncccc\ndddd", DocumentSettings::default());
    doc.insert(doc.line_start_offset(3), '>');
    doc.insert(doc.line_start_offset(0), '>');
    doc.insert(doc.line_start_offset(2) + 4, '<');
    doc.delete(doc.line_start_offset(1) + 4);
    assert_eq!(doc.content(), ">aaaa\nbbb\ncccc<\n>dddd");
    assert_eq!(doc.line_lengths(), &[6, 4, 6, 5]);
    assert_eq!(doc.line_widths(), &[5, 3, 5, 5]);
}

#[test]
fn test_join_all_lines_with_backspace() {
    let mut doc = Document::load("t.txt", b"a\nb\nc\n", DocumentSettings::default());
    while let Some(newline) = doc.find_backward(0..doc.len(), |c| c == '\n') {
        doc.delete(newline + 1);
    }
    assert_eq!(doc.content(), "abc");
    assert_eq!(doc.line_lengths(), &[3]);
}

#[test]
fn test_edit_records() {
    let mut doc = scratch();
    assert_eq!(doc.insert(0, 'x'), Edit::inserted(0, 'x'));
    assert_eq!(doc.insert(1, 'y'), Edit::inserted(1, 'y'));
    assert_eq!(doc.delete(1), Some(Edit::removed(0, 'x')));
    assert_eq!(doc.content(), "y");
}

#[test]
fn test_many_edits_keep_indexes_consistent() {
    // Enough mutations to trip the sampled debug consistency check several times.
    let mut doc = scratch();
    let mut offset = 0;
    for i in 0..500 {
        let ch = match i % 7 {
            0 => '\n',
            1 => '\t',
            _ => 'x',
        };
        doc.insert(offset, ch);
        offset = (offset * 31 + 7) % (doc.len() + 1);
    }
    for _ in 0..200 {
        offset = (offset * 17 + 3) % (doc.len() + 1);
        doc.delete(offset);
    }
    assert_eq!(doc.line_lengths().iter().sum::<usize>(), doc.len());
    assert_eq!(doc.line_count(), doc.content().matches('\n').count() + 1);
}
