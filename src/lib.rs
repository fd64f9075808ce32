// codekg - tree-sitter powered fact extraction for codebase knowledge graphs
//
// The core walks a codebase, parses each eligible file once, and emits a
// flat set of declaration facts (files, functions, classes, top-level
// variables) and reference facts (call edges, import edges). Persisting
// those facts into a graph store and querying them are downstream concerns;
// the fact schema in `facts` is the only contract this crate exports.

pub mod error;
pub mod extractors;
pub mod facts;
pub mod language;
pub mod walker;

pub use error::FileFailure;
pub use extractors::manager::ExtractorManager;
pub use facts::{
    CallEdge, ClassRecord, CodebaseFacts, FileFacts, FileRecord, FunctionRecord, ImportEdge,
    ImportKind, VariableRecord,
};
pub use walker::{CodebaseWalker, WalkerConfig};
