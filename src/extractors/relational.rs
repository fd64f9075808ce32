// Reference fact extraction.
//
// One depth-first walk carrying the name of the nearest enclosing
// function. Call edges record names as written, never resolved bindings:
// the callee of `obj.method()` is just `method`, and matching names to
// declarations is the ingestion layer's documented, best-effort policy.

use tree_sitter::{Node, Tree};

use super::base::SourceView;
use crate::facts::{CallEdge, ImportEdge, ImportKind};

/// Reference facts for a single file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationalFacts {
    pub calls: Vec<CallEdge>,
    pub imports: Vec<ImportEdge>,
}

/// Walks a parsed tree and emits call and import edges.
///
/// Edge multiplicity is preserved: the contract is an exhaustive
/// occurrence list, not an edge set. Consumers wanting one edge per pair
/// deduplicate at ingestion time.
pub struct RelationalExtractor<'s> {
    src: SourceView<'s>,
}

impl<'s> RelationalExtractor<'s> {
    pub fn new(file_path: &'s str, content: &'s str) -> Self {
        Self {
            src: SourceView::new(file_path, content),
        }
    }

    /// Extract all reference facts. Deterministic and side-effect-free.
    pub fn extract(&self, tree: &Tree) -> RelationalFacts {
        let mut facts = RelationalFacts::default();
        self.walk(tree.root_node(), None, &mut facts);
        facts
    }

    fn walk(&self, node: Node, current_function: Option<&str>, out: &mut RelationalFacts) {
        match node.kind() {
            "function_definition" => {
                if let Some(name) = self.src.name_child_text(&node) {
                    // Walk the body once under the new context and stop:
                    // falling through to the generic recursion would count
                    // calls inside nested functions against this one too.
                    let mut cursor = node.walk();
                    for child in node.children(&mut cursor) {
                        self.walk(child, Some(name.as_str()), out);
                    }
                    return;
                }
                // Nameless function node: keep the outer context.
            }
            "call" => {
                // Only calls inside a named function are attributed;
                // module-level call sites are dropped.
                if let Some(caller) = current_function {
                    if let Some(callee) = self.callee_name(&node) {
                        out.calls.push(CallEdge {
                            caller: caller.to_string(),
                            callee,
                            file_path: self.src.file_path.to_string(),
                        });
                    }
                }
                // Arguments may contain further calls; generic recursion
                // below visits them.
            }
            "import_statement" => self.collect_direct_imports(&node, out),
            "import_from_statement" => {
                if let Some(module_node) = node.child_by_field_name("module_name") {
                    out.imports.push(ImportEdge {
                        module_name: self.src.node_text(&module_node),
                        file_path: self.src.file_path.to_string(),
                        import_kind: ImportKind::From,
                    });
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, current_function, out);
        }
    }

    /// Resolve the called name from a call node's function child: a bare
    /// identifier, or the attribute name of a member access with the
    /// receiver discarded. Anything else (subscripts, nested calls) has no
    /// usable name and is skipped.
    fn callee_name(&self, call: &Node) -> Option<String> {
        let function_node = call.child_by_field_name("function")?;
        match function_node.kind() {
            "identifier" => Some(self.src.node_text(&function_node)),
            "attribute" => function_node
                .child_by_field_name("attribute")
                .map(|attr| self.src.node_text(&attr)),
            _ => None,
        }
    }

    /// One edge per dotted module name in an `import` statement. An
    /// aliased import records the referenced module, not the alias.
    fn collect_direct_imports(&self, node: &Node, out: &mut RelationalFacts) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let module_node = match child.kind() {
                "dotted_name" => Some(child),
                "aliased_import" => child.child_by_field_name("name"),
                _ => None,
            };
            if let Some(module_node) = module_node {
                out.imports.push(ImportEdge {
                    module_name: self.src.node_text(&module_node),
                    file_path: self.src.file_path.to_string(),
                    import_kind: ImportKind::Direct,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("load python grammar");
        parser.parse(source, None).expect("parse test source")
    }

    fn extract(source: &str) -> RelationalFacts {
        let tree = parse(source);
        RelationalExtractor::new("test.py", source).extract(&tree)
    }

    #[test]
    fn module_level_call_is_not_attributed() {
        let facts = extract("setup()\n");
        assert!(facts.calls.is_empty());
    }

    #[test]
    fn call_inside_function_produces_one_edge() {
        let source = "\
def f():
    setup()
";
        let facts = extract(source);
        assert_eq!(facts.calls.len(), 1);
        assert_eq!(facts.calls[0].caller, "f");
        assert_eq!(facts.calls[0].callee, "setup");
    }

    #[test]
    fn method_call_keeps_only_the_attribute_name() {
        let source = "\
def f(client):
    client.session.connect()
";
        let facts = extract(source);
        assert_eq!(facts.calls.len(), 1);
        assert_eq!(facts.calls[0].callee, "connect");
    }

    #[test]
    fn repeated_calls_produce_repeated_edges() {
        let source = "\
def f():
    ping()
    ping()
";
        let facts = extract(source);
        assert_eq!(facts.calls.len(), 2);
        assert!(facts.calls.iter().all(|c| c.callee == "ping"));
    }

    #[test]
    fn nested_function_calls_are_not_double_counted() {
        let source = "\
def outer():
    def inner():
        work()
    inner()
";
        let facts = extract(source);
        let callers: Vec<(&str, &str)> = facts
            .calls
            .iter()
            .map(|c| (c.caller.as_str(), c.callee.as_str()))
            .collect();
        assert_eq!(callers, vec![("inner", "work"), ("outer", "inner")]);
    }

    #[test]
    fn calls_in_arguments_are_visited() {
        let source = "\
def f():
    outerfn(innerfn())
";
        let facts = extract(source);
        let callees: Vec<&str> = facts.calls.iter().map(|c| c.callee.as_str()).collect();
        assert_eq!(callees, vec!["outerfn", "innerfn"]);
    }

    #[test]
    fn direct_import_records_the_dotted_name() {
        let facts = extract("import a.b.c\n");
        assert_eq!(facts.imports.len(), 1);
        assert_eq!(facts.imports[0].module_name, "a.b.c");
        assert_eq!(facts.imports[0].import_kind, ImportKind::Direct);
    }

    #[test]
    fn multi_name_import_records_each_module() {
        let facts = extract("import os, sys\n");
        let modules: Vec<&str> = facts
            .imports
            .iter()
            .map(|i| i.module_name.as_str())
            .collect();
        assert_eq!(modules, vec!["os", "sys"]);
    }

    #[test]
    fn aliased_import_records_the_module_not_the_alias() {
        let facts = extract("import numpy as np\n");
        assert_eq!(facts.imports.len(), 1);
        assert_eq!(facts.imports[0].module_name, "numpy");
        assert_eq!(facts.imports[0].import_kind, ImportKind::Direct);
    }

    #[test]
    fn from_import_records_the_source_module_once() {
        let facts = extract("from a.b import c, d\n");
        assert_eq!(facts.imports.len(), 1);
        assert_eq!(facts.imports[0].module_name, "a.b");
        assert_eq!(facts.imports[0].import_kind, ImportKind::From);
    }

    #[test]
    fn extraction_is_deterministic() {
        let source = "\
import os

def f():
    g()

def g():
    os.path.join()
";
        let tree = parse(source);
        let extractor = RelationalExtractor::new("test.py", source);
        assert_eq!(extractor.extract(&tree), extractor.extract(&tree));
    }
}
