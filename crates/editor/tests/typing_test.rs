// Chunk: docs/chunks/view_navigation - Typing through a view
//!
//! Integration tests for editing through a session.
//!
//! These drive the full path from KeyEvent → Session → View → Document and
//! check content, line table and cursor position after each sequence.

use std::rc::Rc;

use gapedit::{DocumentId, EditorConfig, Session, ViewId};
use gapedit_buffer::{PlainText, Position};
use gapedit_input::{Key, KeyEvent, Modifiers};

/// A session with one document and one view over it.
struct MockEditor {
    session: Session,
    doc: DocumentId,
    view: ViewId,
}

impl MockEditor {
    fn new() -> Self {
        Self::from_str("")
    }

    fn from_str(content: &str) -> Self {
        let mut session = Session::new(EditorConfig::default(), Rc::new(PlainText));
        let doc = session.load("test.txt", content.as_bytes());
        let view = session.open_view(doc).unwrap();
        Self { session, doc, view }
    }

    fn key(&mut self, key: Key) {
        self.session.handle_key(self.view, &KeyEvent::plain(key)).unwrap();
    }

    fn key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.session
            .handle_key(self.view, &KeyEvent::new(key, modifiers))
            .unwrap();
    }

    fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.key(Key::Return),
                '\t' => self.key(Key::Tab),
                _ => self.key(Key::Char(ch)),
            }
        }
    }

    fn content(&self) -> String {
        self.session.document(self.doc).unwrap().content()
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.session.document(self.doc).unwrap().line_lengths().to_vec()
    }

    fn cursor(&self) -> Position {
        self.session.view(self.view).unwrap().cursor_position()
    }
}

#[test]
fn test_type_into_empty_document() {
    let mut editor = MockEditor::new();
    editor.type_str("a\n");
    assert_eq!(editor.line_lengths(), vec![2, 0]);
    assert_eq!(editor.cursor(), Position::new(1, 0));
}

#[test]
fn test_type_multiple_lines() {
    let mut editor = MockEditor::new();
    editor.type_str("fn main() {\n\tbody();\n}");
    assert_eq!(editor.content(), "fn main() {\n\tbody();\n}");
    assert_eq!(editor.line_lengths(), vec![12, 9, 1]);
    assert_eq!(editor.cursor(), Position::new(2, 1));
}

#[test]
fn test_backspace_joins_lines() {
    let mut editor = MockEditor::from_str("ab\ncd");
    editor.key(Key::Down);
    editor.key(Key::Home);
    editor.key(Key::Backspace);
    assert_eq!(editor.content(), "abcd");
    assert_eq!(editor.line_lengths(), vec![4]);
    assert_eq!(editor.cursor(), Position::new(0, 2));
}

#[test]
fn test_backspace_at_start_does_nothing() {
    let mut editor = MockEditor::from_str("abc");
    editor.key(Key::Backspace);
    assert_eq!(editor.content(), "abc");
    assert_eq!(editor.cursor(), Position::new(0, 0));
}

#[test]
fn test_forward_delete_at_end_does_nothing() {
    let mut editor = MockEditor::from_str("abc");
    editor.key(Key::End);
    editor.key(Key::Delete);
    assert_eq!(editor.content(), "abc");
}

#[test]
fn test_forward_delete_joins_lines() {
    let mut editor = MockEditor::from_str("ab\ncd");
    editor.key(Key::End);
    editor.key(Key::Delete);
    assert_eq!(editor.content(), "abcd");
    assert_eq!(editor.cursor(), Position::new(0, 2));
}

#[test]
fn test_shift_select_then_type_replaces_nothing() {
    // Typing collapses the selection but does not delete it.
    let mut editor = MockEditor::from_str("abc");
    editor.key_with(Key::End, Modifiers::SHIFT);
    editor.type_str("x");
    assert_eq!(editor.content(), "abcx");
    assert!(editor.session.view(editor.view).unwrap().selection_range().is_none());
}

#[test]
fn test_select_word_and_delete() {
    let mut editor = MockEditor::from_str("let value = 1;");
    editor.key_with(Key::Right, Modifiers::CONTROL);
    editor.key(Key::Right);
    editor.key_with(
        Key::Right,
        Modifiers {
            shift: true,
            control: true,
            alt: false,
        },
    );
    editor.key(Key::Delete);
    assert_eq!(editor.content(), "let  = 1;");
    assert_eq!(editor.cursor(), Position::new(0, 4));
}

#[test]
fn test_control_a_then_backspace_empties_document() {
    let mut editor = MockEditor::from_str("one\ntwo\nthree");
    editor.key_with(Key::Char('a'), Modifiers::CONTROL);
    editor.key(Key::Backspace);
    assert_eq!(editor.content(), "");
    assert_eq!(editor.line_lengths(), vec![0]);
    assert_eq!(editor.cursor(), Position::new(0, 0));
}

#[test]
fn test_modified_characters_are_not_inserted() {
    let mut editor = MockEditor::new();
    editor.key_with(Key::Char('s'), Modifiers::CONTROL);
    editor.key_with(
        Key::Char('x'),
        Modifiers {
            alt: true,
            ..Modifiers::default()
        },
    );
    assert_eq!(editor.content(), "");
}

#[test]
fn test_typing_marks_document_dirty() {
    let mut editor = MockEditor::from_str("abc");
    assert!(!editor.session.document(editor.doc).unwrap().is_dirty());
    editor.type_str("x");
    assert!(editor.session.document(editor.doc).unwrap().is_dirty());
}
