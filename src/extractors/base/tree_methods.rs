// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor {
    /// Find first child by type
    pub fn find_child_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|c| c.kind() == child_type);
        found
    }

    /// Named children, skipping comments
    pub fn named_children<'a>(&self, node: &Node<'a>) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .filter(|c| !c.kind().contains("comment"))
            .collect();
        found
    }

    /// Find nodes by type anywhere below `node`
    pub fn find_nodes_by_type<'a>(&self, node: &Node<'a>, node_type: &str) -> Vec<Node<'a>> {
        let mut nodes = Vec::new();
        self.find_nodes_by_type_recursive(node, node_type, &mut nodes);
        nodes
    }

    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    fn find_nodes_by_type_recursive<'a>(
        &self,
        node: &Node<'a>,
        node_type: &str,
        nodes: &mut Vec<Node<'a>>,
    ) {
        if node.kind() == node_type {
            nodes.push(*node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_nodes_by_type_recursive(&child, node_type, nodes);
        }
    }

    /// Get field text safely
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }

    /// Text of every child under a repeated field (`name` in `a, b int`)
    pub fn get_field_texts(&self, node: &Node, field_name: &str) -> Vec<String> {
        let mut cursor = node.walk();
        let texts = node
            .children_by_field_name(field_name, &mut cursor)
            .map(|n| self.get_node_text(&n))
            .collect();
        texts
    }

    /// Whether `node` has an anonymous child token `token` (e.g. `*`, `pub`)
    pub fn has_token(&self, node: &Node, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == token);
        found
    }
}
