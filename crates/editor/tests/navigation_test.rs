// Chunk: docs/chunks/view_navigation - Cursor movement through a session
//!
//! Integration tests for cursor movement, column memory and scrolling.

use std::rc::Rc;

use gapedit::{Direction, EditorConfig, Session, ViewId};
use gapedit_buffer::{PlainText, Position};
use gapedit_input::ScrollDelta;

fn session_with(content: &str, config: EditorConfig) -> (Session, ViewId) {
    let mut session = Session::new(config, Rc::new(PlainText));
    let doc = session.load("nav.txt", content.as_bytes());
    let view = session.open_view(doc).unwrap();
    (session, view)
}

fn position(session: &Session, view: ViewId) -> Position {
    session.view(view).unwrap().cursor_position()
}

#[test]
fn test_column_memory_through_short_line() {
    // Line lengths [10, 2, 10] without terminators.
    let (mut session, view) = session_with("abcdefghij\nxy\nabcdefghij", EditorConfig::default());
    session.set_cursor(view, 7, false).unwrap();

    session.move_vertical(view, 1, false).unwrap();
    assert_eq!(position(&session, view), Position::new(1, 2));

    session.move_vertical(view, 1, false).unwrap();
    assert_eq!(position(&session, view), Position::new(2, 7));

    session.move_vertical(view, -2, false).unwrap();
    assert_eq!(position(&session, view), Position::new(0, 7));
}

#[test]
fn test_horizontal_move_resets_column_memory() {
    let (mut session, view) = session_with("abcdefghij\nxy\nabcdefghij", EditorConfig::default());
    session.set_cursor(view, 7, false).unwrap();
    session.move_vertical(view, 1, false).unwrap();
    session
        .move_horizontal(view, Direction::Left, false, false)
        .unwrap();
    session.move_vertical(view, 1, false).unwrap();
    assert_eq!(position(&session, view), Position::new(2, 1));
}

#[test]
fn test_word_move_from_start() {
    let (mut session, view) = session_with("foo bar", EditorConfig::default());
    session
        .move_horizontal(view, Direction::Right, true, false)
        .unwrap();
    assert_eq!(session.view(view).unwrap().cursor(), 3);
}

#[test]
fn test_word_moves_stop_at_symbols() {
    let (mut session, view) = session_with("a.b(c_d)", EditorConfig::default());
    let mut stops = Vec::new();
    for _ in 0..5 {
        session
            .move_horizontal(view, Direction::Right, true, false)
            .unwrap();
        stops.push(session.view(view).unwrap().cursor());
    }
    assert_eq!(stops, vec![1, 3, 7, 8, 8]);
}

#[test]
fn test_seek_line_end_then_start() {
    let (mut session, view) = session_with("first\n\tsecond line\n", EditorConfig::default());
    session.move_vertical(view, 1, false).unwrap();
    session.seek_line_end(view, false).unwrap();
    assert_eq!(position(&session, view), Position::new(1, 12));
    session.seek_line_start(view, true).unwrap();
    let view_state = session.view(view).unwrap();
    assert_eq!(view_state.cursor_position(), Position::new(1, 0));
    assert_eq!(view_state.selection_range(), Some(6..18));
}

#[test]
fn test_last_empty_line_is_reachable() {
    let (mut session, view) = session_with("a\nb\n", EditorConfig::default());
    session.move_vertical(view, 10, false).unwrap();
    assert_eq!(position(&session, view), Position::new(2, 0));
}

#[test]
fn test_set_cursor_position_clamps() {
    let (mut session, view) = session_with("ab\ncd", EditorConfig::default());
    session
        .set_cursor_position(view, Position::new(0, 50), false)
        .unwrap();
    assert_eq!(position(&session, view), Position::new(0, 2));
    session
        .set_cursor_position(view, Position::new(9, 1), false)
        .unwrap();
    assert_eq!(position(&session, view), Position::new(1, 1));
}

#[test]
fn test_moving_down_past_window_scrolls() {
    let config = EditorConfig {
        visible_lines: 5,
        row_height: 10.0,
        ..EditorConfig::default()
    };
    let (mut session, view) = session_with(&"line\n".repeat(20), config);
    for _ in 0..7 {
        session.move_vertical(view, 1, false).unwrap();
    }
    let scroll = session.view(view).unwrap().scroll();
    assert_eq!(scroll.first_line(), 3);
    assert_eq!(scroll.target_scroll_offset(), 30.0);

    // Moving back above the window snaps without animation.
    session.move_vertical(view, -6, false).unwrap();
    let scroll = session.view(view).unwrap().scroll();
    assert_eq!(scroll.first_line(), 1);
    assert!(!scroll.is_animating());
}

#[test]
fn test_wheel_scroll_does_not_move_cursor() {
    let (mut session, view) = session_with(&"line\n".repeat(100), EditorConfig::default());
    session.scroll_by(view, ScrollDelta::vertical(160.0)).unwrap();
    let view_state = session.view(view).unwrap();
    assert_eq!(view_state.cursor(), 0);
    assert_eq!(view_state.scroll().first_line(), 10);
}
