// Chunk: docs/chunks/gap_buffer_document - Gap buffer document with line and column indexes

//! Performance sanity checks for the gap buffer.
//!
//! These tests verify that basic operations complete within reasonable time bounds.
//! They are not formal benchmarks but guard against obvious performance regressions.

use gapedit_buffer::{Document, DocumentSettings, GapBuffer};
use std::time::{Duration, Instant};

#[test]
fn insert_100k_chars_into_gap_buffer_under_100ms() {
    let mut buffer = GapBuffer::new();
    let start = Instant::now();

    for i in 0..100_000 {
        buffer.insert(i, 'x');
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(100),
        "Inserting 100K characters took {:?}, expected < 100ms",
        elapsed
    );
    assert_eq!(buffer.len(), 100_000);
}

#[test]
fn local_edits_do_not_move_the_whole_buffer() {
    let mut buffer = GapBuffer::from_chars(std::iter::repeat('x').take(1_000_000), 64);
    let start = Instant::now();

    // Typing in the middle of a large buffer: one gap move, then local edits.
    for i in 0..10_000 {
        buffer.insert(500_000 + i, 'y');
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(500),
        "Typing 10K characters mid-buffer took {:?}, expected < 500ms",
        elapsed
    );
}

#[test]
fn typing_into_document_with_retokenize_under_2s() {
    // Every keystroke re-tokenizes the full content, so this is quadratic overall.
    let mut doc = Document::scratch(DocumentSettings::default());
    let start = Instant::now();

    for i in 0..10_000 {
        let ch = if i % 80 == 79 { '\n' } else { 'x' };
        doc.insert(i, ch);
    }

    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(2),
        "Typing 10K characters took {:?}, expected < 2s",
        elapsed
    );
    assert_eq!(doc.line_count(), 10_000 / 80 + 1);
}
