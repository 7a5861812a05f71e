// Chunk: docs/chunks/session_arena - Arena of documents and views addressed by handle
//!
//! The session owns every open document and view.
//!
//! Documents and views live in slot maps and are referenced everywhere else by
//! [`DocumentId`] / [`ViewId`]. A handle to something that was closed simply
//! stops resolving: lookups return `None` and operations return
//! [`SessionError::UnknownDocument`] / [`SessionError::UnknownView`].
//!
//! Closing a document closes every view over it.
//!
//! Edits always go through a view. After an edit, every *other* view over the
//! same document has its cursor and selection shifted by the edits and its
//! line/column caches re-derived, so no view is ever left pointing at stale
//! positions.

use std::path::Path;
use std::rc::Rc;

use gapedit_buffer::{Classifier, Document, DocumentError, Edit, Position};
use gapedit_input::{KeyEvent, ScrollDelta};
use slotmap::SlotMap;
use thiserror::Error;

use crate::config::EditorConfig;
use crate::scroll::ScrollState;
use crate::view::{Direction, View};

slotmap::new_key_type! {
    /// Handle to a document in a [`Session`].
    pub struct DocumentId;

    /// Handle to a view in a [`Session`].
    pub struct ViewId;
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no open document with id {0:?}")]
    UnknownDocument(DocumentId),

    #[error("no open view with id {0:?}")]
    UnknownView(ViewId),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Open documents and the views over them.
pub struct Session {
    config: EditorConfig,
    classifier: Rc<dyn Classifier>,
    documents: SlotMap<DocumentId, Document>,
    views: SlotMap<ViewId, View>,
}

impl Session {
    /// Creates an empty session. Every document opened in it is highlighted
    /// with `classifier`.
    pub fn new(config: EditorConfig, classifier: Rc<dyn Classifier>) -> Self {
        Self {
            config,
            classifier,
            documents: SlotMap::with_key(),
            views: SlotMap::with_key(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ==================== Documents ====================

    /// Opens an empty, unnamed document.
    pub fn new_scratch(&mut self) -> DocumentId {
        let doc = Document::scratch(self.config.document_settings());
        self.insert_document(doc)
    }

    /// Opens a document decoded from `bytes`. The language is taken from
    /// `name`'s extension.
    pub fn load(&mut self, name: &str, bytes: &[u8]) -> DocumentId {
        let doc = Document::load(name, bytes, self.config.document_settings());
        self.insert_document(doc)
    }

    /// Reads and opens the file at `path`.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<DocumentId, SessionError> {
        let doc = Document::open(path, self.config.document_settings())?;
        Ok(self.insert_document(doc))
    }

    fn insert_document(&mut self, mut doc: Document) -> DocumentId {
        doc.set_classifier(Rc::clone(&self.classifier));
        log::debug!(
            "opened {} ({} codepoints, {} lines, language {})",
            doc.name(),
            doc.len(),
            doc.line_count(),
            doc.language()
        );
        self.documents.insert(doc)
    }

    /// Closes a document and every view over it, returning the document.
    pub fn close_document(&mut self, id: DocumentId) -> Result<Document, SessionError> {
        let doc = self
            .documents
            .remove(id)
            .ok_or(SessionError::UnknownDocument(id))?;
        let before = self.views.len();
        self.views.retain(|_, view| view.document() != id);
        log::debug!(
            "closed {} and {} view(s) over it",
            doc.name(),
            before - self.views.len()
        );
        Ok(doc)
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocumentId, &Document)> {
        self.documents.iter()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Writes a document back to the path it was opened from or saved as.
    pub fn save(&mut self, id: DocumentId) -> Result<(), SessionError> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or(SessionError::UnknownDocument(id))?;
        doc.save_to_path()?;
        log::info!("saved {}", doc.name());
        Ok(())
    }

    /// Writes a document to `path` and makes that its path from now on.
    pub fn save_as(&mut self, id: DocumentId, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let doc = self
            .documents
            .get_mut(id)
            .ok_or(SessionError::UnknownDocument(id))?;
        doc.save_as(path)?;
        log::info!("saved {}", doc.name());
        Ok(())
    }

    // ==================== Views ====================

    /// Opens a view at the start of `document`.
    pub fn open_view(&mut self, document: DocumentId) -> Result<ViewId, SessionError> {
        if !self.documents.contains_key(document) {
            return Err(SessionError::UnknownDocument(document));
        }
        let scroll = ScrollState::new(
            self.config.row_height,
            self.config.visible_lines,
            self.config.scroll_smoothing,
        );
        Ok(self.views.insert(View::new(document, scroll)))
    }

    pub fn close_view(&mut self, id: ViewId) -> Result<View, SessionError> {
        self.views.remove(id).ok_or(SessionError::UnknownView(id))
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    pub fn views(&self) -> impl Iterator<Item = (ViewId, &View)> {
        self.views.iter()
    }

    /// Views over `document`, in no particular order.
    pub fn views_of(&self, document: DocumentId) -> Vec<ViewId> {
        self.views
            .iter()
            .filter(|(_, view)| view.document() == document)
            .map(|(id, _)| id)
            .collect()
    }

    /// The document a view is over.
    pub fn document_of(&self, view: ViewId) -> Option<&Document> {
        self.documents.get(self.views.get(view)?.document())
    }

    // ==================== Operations through a view ====================

    /// Runs `f` with a view and its document.
    fn with_view<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut View, &mut Document) -> R,
    ) -> Result<R, SessionError> {
        let view = self.views.get_mut(id).ok_or(SessionError::UnknownView(id))?;
        let document = view.document();
        let doc = self
            .documents
            .get_mut(document)
            .ok_or(SessionError::UnknownDocument(document))?;
        Ok(f(view, doc))
    }

    /// Runs an editing operation through a view, then brings the other views
    /// over the same document up to date.
    fn edit_through(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut View, &mut Document) -> Vec<Edit>,
    ) -> Result<Vec<Edit>, SessionError> {
        let edits = self.with_view(id, f)?;
        if !edits.is_empty() {
            self.resync_views(id, &edits);
        }
        Ok(edits)
    }

    fn resync_views(&mut self, origin: ViewId, edits: &[Edit]) {
        let Some(document) = self.views.get(origin).map(View::document) else {
            return;
        };
        let Some(doc) = self.documents.get(document) else {
            return;
        };
        for (id, view) in self.views.iter_mut() {
            if id != origin && view.document() == document {
                view.apply_foreign_edits(doc, edits);
            }
        }
    }

    /// Dispatches a key press to a view. Returns the edits it made.
    pub fn handle_key(&mut self, view: ViewId, event: &KeyEvent) -> Result<Vec<Edit>, SessionError> {
        self.edit_through(view, |view, doc| view.handle_key(doc, event))
    }

    pub fn insert_char(&mut self, view: ViewId, ch: char) -> Result<Edit, SessionError> {
        let edit = self.with_view(view, |view, doc| view.insert_char(doc, ch))?;
        self.resync_views(view, std::slice::from_ref(&edit));
        Ok(edit)
    }

    /// Inserts each codepoint of `text` at the cursor in turn.
    pub fn insert_str(&mut self, view: ViewId, text: &str) -> Result<Vec<Edit>, SessionError> {
        self.edit_through(view, |view, doc| {
            text.chars().map(|ch| view.insert_char(doc, ch)).collect()
        })
    }

    pub fn delete_before_cursor(&mut self, view: ViewId) -> Result<Option<Edit>, SessionError> {
        let edit = self.with_view(view, |view, doc| view.delete_before_cursor(doc))?;
        if let Some(edit) = &edit {
            self.resync_views(view, std::slice::from_ref(edit));
        }
        Ok(edit)
    }

    pub fn delete_at_cursor(&mut self, view: ViewId) -> Result<Option<Edit>, SessionError> {
        let edit = self.with_view(view, |view, doc| view.delete_at_cursor(doc))?;
        if let Some(edit) = &edit {
            self.resync_views(view, std::slice::from_ref(edit));
        }
        Ok(edit)
    }

    pub fn delete_selection(&mut self, view: ViewId) -> Result<Vec<Edit>, SessionError> {
        self.edit_through(view, |view, doc| view.delete_selection(doc))
    }

    pub fn move_horizontal(
        &mut self,
        view: ViewId,
        direction: Direction,
        word_mode: bool,
        extend: bool,
    ) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| {
            view.move_horizontal(doc, direction, word_mode, extend)
        })
    }

    pub fn move_vertical(&mut self, view: ViewId, delta: isize, extend: bool) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.move_vertical(doc, delta, extend))
    }

    pub fn seek_line_start(&mut self, view: ViewId, extend: bool) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.seek_line_start(doc, extend))
    }

    pub fn seek_line_end(&mut self, view: ViewId, extend: bool) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.seek_line_end(doc, extend))
    }

    pub fn set_cursor(&mut self, view: ViewId, offset: usize, extend: bool) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.set_cursor(doc, offset, extend))
    }

    pub fn set_cursor_position(
        &mut self,
        view: ViewId,
        pos: Position,
        extend: bool,
    ) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.set_cursor_position(doc, pos, extend))
    }

    pub fn select_all(&mut self, view: ViewId) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.select_all(doc))
    }

    pub fn scroll_by(&mut self, view: ViewId, delta: ScrollDelta) -> Result<(), SessionError> {
        self.with_view(view, |view, doc| view.scroll_by(doc, delta))
    }

    /// Advances every view's scroll animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for view in self.views.values_mut() {
            view.tick(dt);
        }
    }

    /// Returns true while any view is still animating a scroll.
    pub fn is_animating(&self) -> bool {
        self.views.values().any(|view| view.scroll().is_animating())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("documents", &self.documents.len())
            .field("views", &self.views.len())
            .finish()
    }
}
