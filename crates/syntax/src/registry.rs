// Chunk: docs/chunks/syntax_classifier - Language registry for the bundled grammars

//! Language registry mapping file extensions to tree-sitter configurations.
//!
//! This module provides `LanguageRegistry` which maps file extensions to
//! tree-sitter `Language` objects and their highlight queries.

use std::collections::HashMap;
use std::sync::OnceLock;

use tree_sitter::Language;

/// Configuration for a language's syntax highlighting.
#[derive(Clone)]
pub struct LanguageConfig {
    /// Canonical language name; configs sharing a name share a compiled query.
    pub name: &'static str,
    /// The tree-sitter language
    pub language: Language,
    /// The highlights query (tree-sitter query syntax)
    pub highlights_query: &'static str,
}

impl LanguageConfig {
    pub fn new(name: &'static str, language: Language, highlights_query: &'static str) -> Self {
        Self {
            name,
            language,
            highlights_query,
        }
    }
}

impl std::fmt::Debug for LanguageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageConfig")
            .field("name", &self.name)
            .field("highlights_query_len", &self.highlights_query.len())
            .finish()
    }
}

/// C++ needs the C highlight query as a base, with C++-specific additions layered on top.
/// The C++ grammar's query only covers C++-specific constructs (templates, namespaces,
/// `this`, etc.), while types, keywords and functions come from the C query.
fn cpp_highlights_query() -> &'static str {
    static QUERY: OnceLock<String> = OnceLock::new();
    QUERY.get_or_init(|| {
        format!(
            "{}\n{}",
            tree_sitter_c::HIGHLIGHT_QUERY,
            tree_sitter_cpp::HIGHLIGHT_QUERY
        )
    })
}

/// Registry mapping file extensions to language configurations.
///
/// Supports Rust, C, C++, Python, JavaScript, Go, JSON, TOML and Bash.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    /// Map from extension (without leading dot) to language config
    configs: HashMap<&'static str, LanguageConfig>,
}

impl LanguageRegistry {
    /// Creates an empty language registry.
    pub fn empty() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Creates a new language registry with all supported languages.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(
            &["rs"],
            LanguageConfig::new(
                "rust",
                tree_sitter_rust::LANGUAGE.into(),
                tree_sitter_rust::HIGHLIGHTS_QUERY,
            ),
        );

        // C (uses HIGHLIGHT_QUERY - no S)
        registry.register(
            &["c"],
            LanguageConfig::new(
                "c",
                tree_sitter_c::LANGUAGE.into(),
                tree_sitter_c::HIGHLIGHT_QUERY,
            ),
        );

        // .h is ambiguous, default to C++
        registry.register(
            &["cpp", "cc", "cxx", "hpp", "h"],
            LanguageConfig::new(
                "cpp",
                tree_sitter_cpp::LANGUAGE.into(),
                cpp_highlights_query(),
            ),
        );

        registry.register(
            &["py"],
            LanguageConfig::new(
                "python",
                tree_sitter_python::LANGUAGE.into(),
                tree_sitter_python::HIGHLIGHTS_QUERY,
            ),
        );

        // JavaScript (uses HIGHLIGHT_QUERY - no S)
        registry.register(
            &["js", "jsx", "mjs"],
            LanguageConfig::new(
                "javascript",
                tree_sitter_javascript::LANGUAGE.into(),
                tree_sitter_javascript::HIGHLIGHT_QUERY,
            ),
        );

        registry.register(
            &["go"],
            LanguageConfig::new(
                "go",
                tree_sitter_go::LANGUAGE.into(),
                tree_sitter_go::HIGHLIGHTS_QUERY,
            ),
        );

        registry.register(
            &["json"],
            LanguageConfig::new(
                "json",
                tree_sitter_json::LANGUAGE.into(),
                tree_sitter_json::HIGHLIGHTS_QUERY,
            ),
        );

        registry.register(
            &["toml"],
            LanguageConfig::new(
                "toml",
                tree_sitter_toml_ng::LANGUAGE.into(),
                tree_sitter_toml_ng::HIGHLIGHTS_QUERY,
            ),
        );

        // Bash (uses HIGHLIGHT_QUERY - no S)
        registry.register(
            &["sh", "bash"],
            LanguageConfig::new(
                "bash",
                tree_sitter_bash::LANGUAGE.into(),
                tree_sitter_bash::HIGHLIGHT_QUERY,
            ),
        );

        registry
    }

    /// Maps each of `extensions` to `config`, replacing earlier mappings.
    pub fn register(&mut self, extensions: &[&'static str], config: LanguageConfig) {
        for ext in extensions {
            self.configs.insert(*ext, config.clone());
        }
    }

    /// Returns the language configuration for a file extension.
    ///
    /// The extension can be with or without a leading dot (e.g., ".rs" or "rs"),
    /// in any case.
    pub fn config_for_extension(&self, ext: &str) -> Option<&LanguageConfig> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        self.configs.get(ext.as_str())
    }

    /// Returns the language configuration for a language name such as "rust"
    /// or "python". Extensions are accepted too.
    pub fn config_for_language_name(&self, name: &str) -> Option<&LanguageConfig> {
        let name = name.trim().to_lowercase();
        let ext = match name.as_str() {
            "rust" => "rs",
            "python" => "py",
            "javascript" => "js",
            "shell" => "sh",
            "c++" => "cpp",
            "golang" => "go",
            other => other,
        };
        self.config_for_extension(ext)
    }

    /// Returns an iterator over all supported extensions.
    pub fn supported_extensions(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().copied()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
