// Chunk: docs/chunks/syntax_classifier - Tree-sitter implementation of the Classifier contract

//! Tree-sitter classifier.
//!
//! Every call parses the full content from scratch and runs the language's
//! highlight query over the whole tree. Captures are sorted by start, overlaps
//! are dropped (the first capture covering a byte wins), and byte ranges are
//! converted to the codepoint offsets documents use.
//!
//! Compiled queries are cached per language; compiling the larger queries costs
//! far more than a parse of a typical file.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gapedit_buffer::{Classifier, ClassifyError, HighlightCategory, HighlightSpan, LanguageId};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

use crate::category::category_for_capture;
use crate::registry::{LanguageConfig, LanguageRegistry};

/// A compiled highlight query with its capture categories resolved up front.
struct CompiledQuery {
    query: Query,
    /// Category for each capture index, `None` for captures that are not highlighted.
    categories: Vec<Option<HighlightCategory>>,
}

impl CompiledQuery {
    fn compile(config: &LanguageConfig) -> Result<Self, tree_sitter::QueryError> {
        let query = Query::new(&config.language, config.highlights_query)?;
        let categories = query
            .capture_names()
            .iter()
            .map(|name| category_for_capture(name))
            .collect();
        Ok(Self { query, categories })
    }
}

/// A capture entry: (start_byte, end_byte, category).
type CaptureEntry = (usize, usize, HighlightCategory);

/// Classifier backed by the grammars in a [`LanguageRegistry`].
pub struct TreeSitterClassifier {
    registry: LanguageRegistry,
    parser: RefCell<Parser>,
    /// Compiled queries keyed by [`LanguageConfig::name`].
    queries: RefCell<HashMap<&'static str, Rc<CompiledQuery>>>,
}

impl TreeSitterClassifier {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self {
            registry,
            parser: RefCell::new(Parser::new()),
            queries: RefCell::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Returns true if `language` has a grammar in the registry.
    pub fn supports(&self, language: &LanguageId) -> bool {
        self.registry.config_for_extension(language.as_str()).is_some()
    }

    fn query_for(
        &self,
        config: &LanguageConfig,
        language: &LanguageId,
    ) -> Result<Rc<CompiledQuery>, ClassifyError> {
        if let Some(query) = self.queries.borrow().get(config.name) {
            return Ok(Rc::clone(query));
        }

        let compiled = CompiledQuery::compile(config).map_err(|err| ClassifyError::Unavailable {
            language: language.clone(),
            reason: format!("highlight query does not compile: {}", err),
        })?;
        log::debug!(
            "compiled {} highlight query ({} captures)",
            config.name,
            compiled.categories.len()
        );
        let compiled = Rc::new(compiled);
        self.queries
            .borrow_mut()
            .insert(config.name, Rc::clone(&compiled));
        Ok(compiled)
    }

    /// Collects categorized captures over the whole tree, sorted by start.
    fn collect_captures(
        &self,
        config: &LanguageConfig,
        compiled: &CompiledQuery,
        content: &str,
        language: &LanguageId,
    ) -> Result<Vec<CaptureEntry>, ClassifyError> {
        let mut parser = self.parser.borrow_mut();
        parser
            .set_language(&config.language)
            .map_err(|err| ClassifyError::Unavailable {
                language: language.clone(),
                reason: err.to_string(),
            })?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ClassifyError::Failed {
                language: language.clone(),
                reason: "parser produced no tree".to_owned(),
            })?;

        let mut captures = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut captures_iter = cursor.captures(&compiled.query, tree.root_node(), content.as_bytes());
        while let Some((mat, capture_idx)) = captures_iter.next() {
            let capture = &mat.captures[*capture_idx];
            let Some(category) = compiled
                .categories
                .get(capture.index as usize)
                .copied()
                .flatten()
            else {
                continue;
            };
            let node = capture.node;
            if node.end_byte() > node.start_byte() {
                captures.push((node.start_byte(), node.end_byte(), category));
            }
        }

        // Stable: captures of the same node keep their query order.
        captures.sort_by_key(|(start, _, _)| *start);
        Ok(captures)
    }
}

impl Default for TreeSitterClassifier {
    fn default() -> Self {
        Self::new(LanguageRegistry::new())
    }
}

impl Classifier for TreeSitterClassifier {
    fn classify(
        &self,
        content: &str,
        language: &LanguageId,
    ) -> Result<Vec<HighlightSpan>, ClassifyError> {
        let Some(config) = self.registry.config_for_extension(language.as_str()) else {
            return Ok(Vec::new());
        };
        let compiled = self.query_for(config, language)?;
        let captures = self.collect_captures(config, &compiled, content, language)?;
        Ok(captures_to_spans(content, &captures))
    }
}

/// Drops overlapping captures and converts byte ranges to codepoint spans.
///
/// `captures` must be sorted by start byte.
fn captures_to_spans(content: &str, captures: &[CaptureEntry]) -> Vec<HighlightSpan> {
    let mut spans = Vec::with_capacity(captures.len());
    let mut covered_to = 0;
    let mut offsets = CharOffsets::new(content);

    for &(start, end, category) in captures {
        if start < covered_to {
            continue;
        }
        covered_to = end;
        let char_start = offsets.advance_to(start);
        let char_end = offsets.advance_to(end);
        spans.push(HighlightSpan::new(char_start, char_end - char_start, category));
    }
    spans
}

/// Forward-only byte offset to codepoint offset conversion.
struct CharOffsets<'a> {
    content: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            byte: 0,
            chars: 0,
        }
    }

    /// Returns the codepoint offset of `byte`, which must be a char boundary at
    /// or after the previous call's argument.
    fn advance_to(&mut self, byte: usize) -> usize {
        let byte = byte.min(self.content.len());
        if byte > self.byte {
            self.chars += self.content[self.byte..byte].chars().count();
            self.byte = byte;
        }
        self.chars
    }
}
