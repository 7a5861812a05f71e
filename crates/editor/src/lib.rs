// Chunk: docs/chunks/session_arena - Editor library interface
//!
//! gapedit: views and sessions over gap-buffer documents.
//!
//! A [`Session`] owns open [`Document`](gapedit_buffer::Document)s and the
//! [`View`]s over them. Views hold a cursor, a selection anchor and scroll
//! state; all editing goes through a view so that other views over the same
//! document can be kept in step.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use gapedit::{EditorConfig, Session};
//! use gapedit_buffer::PlainText;
//! use gapedit_input::{Key, KeyEvent};
//!
//! let mut session = Session::new(EditorConfig::default(), Rc::new(PlainText));
//! let doc = session.load("notes.txt", b"hello");
//! let view = session.open_view(doc).unwrap();
//!
//! session.handle_key(view, &KeyEvent::plain(Key::End)).unwrap();
//! session.insert_str(view, " world").unwrap();
//! assert_eq!(session.document(doc).unwrap().content(), "hello world");
//! ```

pub mod config;
pub mod scroll;
pub mod session;
pub mod view;

pub use config::{config_file_path, ConfigError, EditorConfig};
pub use scroll::ScrollState;
pub use session::{DocumentId, Session, SessionError, ViewId};
pub use view::{is_symbol, Direction, View};
