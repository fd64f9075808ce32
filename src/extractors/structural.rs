// Declaration fact extraction.
//
// One depth-first walk over the syntax tree, carrying the name of the
// nearest enclosing class. Class subtrees are entered exactly once, under
// the new context; function bodies keep the surrounding class context so
// nested defs inherit the nearest class at declaration time.

use tree_sitter::{Node, Tree};

use super::base::SourceView;
use crate::facts::{ClassRecord, FunctionRecord, VariableRecord};

/// Declaration facts for a single file. Always materialized, even when
/// every collection is empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructuralFacts {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub variables: Vec<VariableRecord>,
}

/// Walks a parsed tree and emits function, class, and top-level variable
/// declarations.
pub struct StructuralExtractor<'s> {
    src: SourceView<'s>,
}

impl<'s> StructuralExtractor<'s> {
    pub fn new(file_path: &'s str, content: &'s str) -> Self {
        Self {
            src: SourceView::new(file_path, content),
        }
    }

    /// Extract all declaration facts. Deterministic and side-effect-free:
    /// two passes over the same tree yield identical collections.
    pub fn extract(&self, tree: &Tree) -> StructuralFacts {
        let mut facts = StructuralFacts::default();
        self.walk(tree.root_node(), None, 0, &mut facts);
        facts
    }

    fn walk(
        &self,
        node: Node,
        enclosing_class: Option<&str>,
        depth: usize,
        out: &mut StructuralFacts,
    ) {
        match node.kind() {
            "class_definition" => {
                if let Some(name) = self.src.name_child_text(&node) {
                    out.classes.push(ClassRecord {
                        name: name.clone(),
                        line_number: self.src.node_line(&node),
                        file_path: self.src.file_path.to_string(),
                        enclosing_class: enclosing_class.map(str::to_string),
                    });

                    // Descend once, under the new context. Returning here
                    // keeps the generic recursion below from visiting the
                    // same subtree a second time under the old context.
                    let mut cursor = node.walk();
                    for child in node.children(&mut cursor) {
                        self.walk(child, Some(name.as_str()), depth + 1, out);
                    }
                    return;
                }
                // Nameless class node: no record, keep walking.
            }
            "function_definition" => {
                if let Some(name) = self.src.name_child_text(&node) {
                    out.functions.push(FunctionRecord {
                        name,
                        line_number: self.src.node_line(&node),
                        file_path: self.src.file_path.to_string(),
                        parameters: self.extract_parameters(&node),
                        enclosing_class: enclosing_class.map(str::to_string),
                    });
                }
                // The body is walked by the generic recursion under the
                // unchanged class context.
            }
            // Module-level statements sit at depth 1, so a top-level
            // assignment's node is at depth 2 inside its expression
            // statement. Deeper assignments are locals and stay invisible.
            "assignment" if depth == 2 => {
                if node
                    .parent()
                    .is_some_and(|p| p.kind() == "expression_statement")
                {
                    self.extract_variable(&node, out);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, enclosing_class, depth + 1, out);
        }
    }

    /// Bare identifier parameters only. Defaulted, annotated, and variadic
    /// parameters have non-identifier node shapes and are skipped.
    fn extract_parameters(&self, node: &Node) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(parameters_node) = node.child_by_field_name("parameters") {
            let mut cursor = parameters_node.walk();
            for child in parameters_node.children(&mut cursor) {
                if child.kind() == "identifier" {
                    params.push(self.src.node_text(&child));
                }
            }
        }
        params
    }

    /// Record a top-level binding whose target is a single bare identifier.
    /// Tuple, attribute, and subscript targets are deliberately skipped.
    fn extract_variable(&self, node: &Node, out: &mut StructuralFacts) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        out.variables.push(VariableRecord {
            name: self.src.node_text(&left),
            line_number: self.src.node_line(node),
            file_path: self.src.file_path.to_string(),
        });
    }
}
