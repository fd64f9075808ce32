// Codebase walking and aggregation.
//
// Discovery prunes a deny-list of non-source directory names before
// descending, keeps files whose extension is on the allow-list, and sorts
// the result so the aggregate is deterministic regardless of filesystem
// order. Per-file extraction runs in parallel; files are independent and
// the merge is concatenation in discovery order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::extractors::manager::ExtractorManager;
use crate::facts::{CodebaseFacts, FileFacts};

/// Which files a walk includes.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// File extensions (without the dot) eligible for extraction.
    pub extensions: Vec<String>,
    /// Directory names pruned before descent. Name matching is exact per
    /// path component, not a content-sensitive heuristic.
    pub exclude_dirs: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["py".to_string()],
            exclude_dirs: [
                "venv",
                ".git",
                "node_modules",
                "dist",
                "build",
                "__pycache__",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Walks a codebase root and aggregates per-file facts.
///
/// A failure reading, decoding, or parsing one file is logged and that
/// file is excluded; the walk always completes and sibling files are
/// unaffected.
pub struct CodebaseWalker {
    config: WalkerConfig,
    manager: ExtractorManager,
}

impl Default for CodebaseWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl CodebaseWalker {
    pub fn new() -> Self {
        Self::with_config(WalkerConfig::default())
    }

    pub fn with_config(config: WalkerConfig) -> Self {
        Self {
            config,
            manager: ExtractorManager::new(),
        }
    }

    /// Walk `root` and return every fact extracted from eligible files.
    pub fn walk(&self, root: &Path) -> CodebaseFacts {
        let paths = self.discover(root);
        debug!(
            "discovered {} candidate files under {}",
            paths.len(),
            root.display()
        );

        let per_file: Vec<FileFacts> = paths
            .par_iter()
            .filter_map(|path| match self.manager.extract_file_facts(path) {
                Ok(facts) => Some(facts),
                Err(failure) => {
                    warn!("skipping {}: {}", path.display(), failure);
                    None
                }
            })
            .collect();

        let mut aggregate = CodebaseFacts::default();
        for facts in per_file {
            aggregate.absorb(facts);
        }
        aggregate
    }

    /// Eligible file paths under `root`, sorted lexicographically.
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {}", root.display(), err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.has_allowed_extension(entry.path()))
            .map(DirEntry::into_path)
            .collect();

        paths.sort();
        paths
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.config.exclude_dirs.iter().any(|dir| dir == name))
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.extensions.iter().any(|allowed| allowed == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn walk_collects_facts_across_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", b"def f():\n    g()\n");
        write(dir.path(), "sub/b.py", b"def g():\n    pass\n");

        let facts = CodebaseWalker::new().walk(dir.path());
        assert_eq!(facts.files.len(), 2);
        assert_eq!(facts.functions.len(), 2);
        assert_eq!(facts.calls.len(), 1);
    }

    #[test]
    fn excluded_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", b"x = 1\n");
        write(dir.path(), "venv/lib/site.py", b"y = 2\n");
        write(dir.path(), "__pycache__/cached.py", b"z = 3\n");
        write(dir.path(), ".git/hook.py", b"w = 4\n");

        let facts = CodebaseWalker::new().walk(dir.path());
        assert_eq!(facts.files.len(), 1);
        assert!(facts.files[0].path.ends_with("main.py"));
        let names: Vec<&str> = facts.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn only_allow_listed_extensions_are_parsed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "mod.py", b"def f():\n    pass\n");
        write(dir.path(), "README.md", b"# readme\n");
        write(dir.path(), "data.json", b"{}\n");

        let facts = CodebaseWalker::new().walk(dir.path());
        assert_eq!(facts.files.len(), 1);
        assert_eq!(facts.files[0].name, "mod.py");
    }

    #[test]
    fn undecodable_file_is_skipped_and_siblings_survive() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", b"def first():\n    pass\n");
        write(dir.path(), "b.py", b"\xff\xfe\x00garbage");
        write(dir.path(), "c.py", b"def third():\n    pass\n");

        let facts = CodebaseWalker::new().walk(dir.path());
        assert_eq!(facts.files.len(), 2);
        let names: Vec<&str> = facts.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
        assert!(!facts.files.iter().any(|f| f.name == "b.py"));
    }

    #[test]
    fn empty_root_yields_empty_aggregate() {
        let dir = TempDir::new().unwrap();
        let facts = CodebaseWalker::new().walk(dir.path());
        assert_eq!(facts, CodebaseFacts::default());
    }

    #[test]
    fn aggregate_order_follows_sorted_paths() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "z_last.py", b"def z():\n    pass\n");
        write(dir.path(), "a_first.py", b"def a():\n    pass\n");
        write(dir.path(), "m_middle.py", b"def m():\n    pass\n");

        let facts = CodebaseWalker::new().walk(dir.path());
        let names: Vec<&str> = facts.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a_first.py", "m_middle.py", "z_last.py"]);
        let funcs: Vec<&str> = facts.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(funcs, vec!["a", "m", "z"]);
    }

    #[test]
    fn custom_config_controls_extensions_and_exclusions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "keep/mod.py", b"a = 1\n");
        write(dir.path(), "skipme/mod.py", b"b = 2\n");

        let walker = CodebaseWalker::with_config(WalkerConfig {
            extensions: vec!["py".to_string()],
            exclude_dirs: vec!["skipme".to_string()],
        });
        let facts = walker.walk(dir.path());
        assert_eq!(facts.files.len(), 1);
        assert!(facts.files[0].path.ends_with("keep/mod.py"));
    }
}
