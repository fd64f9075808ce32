//! ExtractorManager - per-file entry point for fact extraction
//!
//! Reads and decodes one file, parses it once, and runs the structural and
//! relational extractors over the same tree. The walker drives this per
//! file; callers that already hold content (tests, alternative front ends)
//! can use [`ExtractorManager::extract_source`] directly.

use std::fs;
use std::path::Path;

use tree_sitter::{Parser, Tree};

use crate::error::FileFailure;
use crate::extractors::relational::RelationalExtractor;
use crate::extractors::structural::StructuralExtractor;
use crate::facts::{FileFacts, FileRecord};
use crate::language;

/// Stateless manager that turns one source file into a [`FileFacts`]
/// slice. A fresh parser is built per call, so the manager is safe to
/// share across parallel per-file work.
pub struct ExtractorManager;

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self
    }

    /// Read, decode, parse, and extract one file.
    ///
    /// Any failure here is file-level: the caller logs it and drops the
    /// file from the batch. A failed file never contributes partial facts.
    pub fn extract_file_facts(&self, path: &Path) -> Result<FileFacts, FileFailure> {
        let bytes = fs::read(path).map_err(|source| FileFailure::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| FileFailure::Encoding {
            path: path.to_path_buf(),
        })?;

        // Store Unix-style path strings so fact keys compare consistently
        // across platforms.
        let file_path = path.to_string_lossy().replace('\\', "/");
        self.extract_source(&file_path, &content)
    }

    /// Parse already-decoded content and run both extractors over the
    /// resulting tree.
    pub fn extract_source(&self, file_path: &str, content: &str) -> Result<FileFacts, FileFailure> {
        let tree = self.parse(file_path, content)?;

        let structural = StructuralExtractor::new(file_path, content).extract(&tree);
        let relational = RelationalExtractor::new(file_path, content).extract(&tree);

        tracing::debug!(
            "extracted {} functions, {} classes, {} variables, {} calls, {} imports from {}",
            structural.functions.len(),
            structural.classes.len(),
            structural.variables.len(),
            relational.calls.len(),
            relational.imports.len(),
            file_path
        );

        let name = Path::new(file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());

        Ok(FileFacts {
            file: FileRecord {
                path: file_path.to_string(),
                name,
            },
            functions: structural.functions,
            classes: structural.classes,
            variables: structural.variables,
            calls: relational.calls,
            imports: relational.imports,
        })
    }

    fn parse(&self, file_path: &str, content: &str) -> Result<Tree, FileFailure> {
        let extension = Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        let language_name = language::detect_language_from_extension(extension).ok_or_else(|| {
            FileFailure::Unsupported {
                path: file_path.into(),
            }
        })?;
        let ts_language =
            language::get_tree_sitter_language(language_name).map_err(|e| FileFailure::Parser {
                message: e.to_string(),
            })?;

        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| FileFailure::Parser {
                message: format!("failed to set parser language for {language_name}: {e}"),
            })?;

        parser.parse(content, None).ok_or_else(|| FileFailure::Parse {
            path: file_path.into(),
        })
    }
}
