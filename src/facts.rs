// Fact schema - the contract between extraction and ingestion
//
// All records are immutable value types, created once per extraction pass
// and owned by the aggregated result set. The ingestion layer upserts
// nodes keyed by (name, file_path) or path and links edges by name; the
// schema deliberately carries names, not resolved identities.

use serde::{Deserialize, Serialize};

/// One successfully parsed file. `path` is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
}

/// A function or method declaration.
///
/// Identity is not globally unique by name alone: the same name may recur
/// in different files, or as methods of different classes. Uniqueness is
/// `(name, file_path)` at minimum, with `enclosing_class` disambiguating
/// methods that share a name with free functions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    /// 1-based source line of the declaration.
    pub line_number: u32,
    pub file_path: String,
    /// Parameter identifiers in declaration order. Bare identifiers only;
    /// defaulted, annotated, and variadic parameters are not captured.
    pub parameters: Vec<String>,
    /// Nearest lexically enclosing class at the point of declaration,
    /// `None` for module-level functions.
    pub enclosing_class: Option<String>,
}

/// A class declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub line_number: u32,
    pub file_path: String,
    /// Nearest enclosing class for nested classes, `None` at module level.
    pub enclosing_class: Option<String>,
}

/// A module-level variable binding. Nested and local variables are
/// intentionally not captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableRecord {
    pub name: String,
    pub line_number: u32,
    pub file_path: String,
}

/// A directed call occurrence: some function body names a callee.
///
/// Edges are not deduplicated; repeated calls in source produce repeated
/// edges, so call counts remain derivable downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallEdge {
    /// Name of the nearest enclosing function at the call site.
    pub caller: String,
    /// Called name as written: a bare identifier, or the attribute name of
    /// a member access with the receiver discarded.
    pub callee: String,
    pub file_path: String,
}

/// How a module was brought into scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import a.b.c`
    Direct,
    /// `from a.b import c`
    From,
}

/// A module reference from an import statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportEdge {
    pub module_name: String,
    pub file_path: String,
    pub import_kind: ImportKind,
}

/// Everything extracted from a single file.
///
/// This is the unit of failure isolation: a file either contributes a
/// complete `FileFacts` to the aggregate or nothing at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFacts {
    pub file: FileRecord,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub variables: Vec<VariableRecord>,
    pub calls: Vec<CallEdge>,
    pub imports: Vec<ImportEdge>,
}

/// The aggregated result of a whole codebase walk.
///
/// Every fact's `file_path` matches some entry in `files`; the aggregate
/// performs no cross-file deduplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodebaseFacts {
    pub files: Vec<FileRecord>,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub variables: Vec<VariableRecord>,
    pub calls: Vec<CallEdge>,
    pub imports: Vec<ImportEdge>,
}

impl CodebaseFacts {
    /// Fold one file's facts into the aggregate. Concatenation only, so
    /// merging per-file results is order-preserving and associative.
    pub fn absorb(&mut self, facts: FileFacts) {
        self.files.push(facts.file);
        self.functions.extend(facts.functions);
        self.classes.extend(facts.classes);
        self.variables.extend(facts.variables);
        self.calls.extend(facts.calls);
        self.imports.extend(facts.imports);
    }
}
