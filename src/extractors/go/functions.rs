use tree_sitter::Node;

use crate::extractors::is_upper_exported;
use crate::graph::{base_type_name, Function, TypeParam};

/// Function and method extraction for Go
impl super::GoExtractor {
    pub(super) fn extract_function(&self, node: Node) -> Function {
        let name = self.base.get_field_text(&node, "name").unwrap_or_default();
        let mut function = Function::new(name);
        self.fill_callable(&mut function, &node);
        function.type_params = self.type_params(&node);
        function.is_constructor = function.name.starts_with("New");
        function
    }

    /// Method with its receiver reduced to the base type name
    ///
    /// `func (s *Stack[T]) Push` binds to `Stack` and records `T` as a
    /// type parameter of the method.
    pub(super) fn extract_method(&self, node: Node) -> Function {
        let name = self.base.get_field_text(&node, "name").unwrap_or_default();
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|list| {
                self.base
                    .named_children(&list)
                    .into_iter()
                    .find(|d| d.kind() == "parameter_declaration")
            })
            .and_then(|decl| decl.child_by_field_name("type"));

        let receiver_text = receiver
            .map(|r| self.base.get_node_text(&r))
            .unwrap_or_default();
        let mut method = Function::method(base_type_name(&receiver_text), name);
        self.fill_callable(&mut method, &node);
        method.exported = is_upper_exported(&method.name);

        if let Some(receiver) = receiver {
            method.type_params = self.receiver_type_params(&receiver);
        }
        method
    }

    fn fill_callable(&self, function: &mut Function, node: &Node) {
        if let Some(params) = node.child_by_field_name("parameters") {
            function.parameters = self.parameters(&params);
        }
        function.results = self.results(node);
        function.signature = self.signature_text(node);
        function.body = node.child_by_field_name("body").map(|b| self.base.span(&b));
        function.span = self.base.span(node);
        function.comment = self.base.find_doc_comment(node);
    }

    /// Type argument names of a generic receiver (`*Map[K, V]` → K, V)
    fn receiver_type_params(&self, receiver: &Node) -> Vec<TypeParam> {
        let generic = if receiver.kind() == "pointer_type" {
            receiver.named_child(0)
        } else {
            Some(*receiver)
        };
        let Some(args) = generic
            .filter(|g| g.kind() == "generic_type")
            .and_then(|g| g.child_by_field_name("type_arguments"))
        else {
            return Vec::new();
        };
        self.base
            .named_children(&args)
            .iter()
            .map(|arg| TypeParam::new(self.base.get_node_text(arg), ""))
            .collect()
    }
}
