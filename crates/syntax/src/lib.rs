// Chunk: docs/chunks/syntax_classifier - Tree-sitter classifier for document highlighting

//! gapedit-syntax: tree-sitter-based classification for gapedit documents.
//!
//! This crate implements the [`Classifier`](gapedit_buffer::Classifier)
//! contract from `gapedit-buffer` on top of tree-sitter grammars.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`TreeSitterClassifier`]: Parses the full document and runs the
//!   language's highlight query, producing codepoint-offset spans.
//!
//! - [`LanguageRegistry`]: Maps file extensions to grammars and queries.
//!
//! - [`category_for_capture`]: Maps capture names to highlight categories.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use gapedit_buffer::{Document, DocumentSettings, HighlightCategory};
//! use gapedit_syntax::TreeSitterClassifier;
//!
//! let mut doc = Document::load("main.rs", b"fn main() {}", DocumentSettings::default());
//! doc.set_classifier(Rc::new(TreeSitterClassifier::default()));
//! assert_eq!(doc.highlight_spans()[0].category, HighlightCategory::Keyword);
//! ```

mod category;
mod classifier;
mod registry;

pub use category::category_for_capture;
pub use classifier::TreeSitterClassifier;
pub use registry::{LanguageConfig, LanguageRegistry};
