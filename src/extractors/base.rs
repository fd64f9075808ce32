// Shared node helpers for the extraction walks.

use tree_sitter::Node;

/// Borrowed view of one file's path and decoded content, shared by both
/// extractors during a single pass.
pub(crate) struct SourceView<'s> {
    pub file_path: &'s str,
    content: &'s str,
}

impl<'s> SourceView<'s> {
    pub fn new(file_path: &'s str, content: &'s str) -> Self {
        Self { file_path, content }
    }

    /// Text spanned by a node. Content is validated UTF-8 before any walk
    /// starts, so the lossy conversion never actually replaces bytes; an
    /// out-of-range span yields an empty string rather than a panic.
    pub fn node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// 1-based source line of a node's start.
    pub fn node_line(&self, node: &Node) -> u32 {
        node.start_position().row as u32 + 1
    }

    /// Resolve the `name` field child of a declaration node. `None` for
    /// malformed nodes; callers skip the record and keep walking.
    pub fn name_child_text(&self, node: &Node) -> Option<String> {
        node.child_by_field_name("name")
            .map(|name_node| self.node_text(&name_node))
    }
}
