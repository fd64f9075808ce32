//! Language support - shared tree-sitter language configuration
//!
//! Single source of truth for which grammars this crate knows about. The
//! manager and walker go through here rather than naming grammar crates
//! directly, so adding a dialect stays a localized change.

use anyhow::Result;

/// Get the tree-sitter grammar for a given language name.
///
/// Python is the one supported syntax dialect.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: python",
            language
        )),
    }
}

/// Detect language from a file extension.
///
/// Returns a name that can be passed to [`get_tree_sitter_language`].
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "py" => Some("python"),
        _ => None,
    }
}
