use tree_sitter::Node;

use crate::extractors::is_upper_exported;
use crate::graph::{Binding, Import, Span};

/// Import, const and var declarations
impl super::GoExtractor {
    pub(super) fn extract_imports(&mut self, node: Node) {
        for spec in self.base.find_nodes_by_type(&node, "import_spec") {
            let Some(path) = self.base.get_field_text(&spec, "path") else {
                continue;
            };
            let mut import = Import::new(path.trim_matches(|c| c == '"' || c == '`'));
            import.alias = self.base.get_field_text(&spec, "name");
            import.span = self.base.span(&spec);

            self.imports
                .insert(import.local_name().to_string(), import.path.clone());
            self.file.add_import(import);
        }
    }

    pub(super) fn extract_const_declaration(&mut self, node: Node) {
        for binding in self.extract_bindings(node, "const_spec") {
            self.file.add_constant(binding);
        }
    }

    pub(super) fn extract_var_declaration(&mut self, node: Node) {
        for binding in self.extract_bindings(node, "var_spec") {
            self.file.add_variable(binding);
        }
    }

    /// One binding per name; `a, b = 1, 2` pairs the i-th name with the
    /// i-th value and both share the spec's span
    fn extract_bindings(&self, decl: Node, spec_kind: &str) -> Vec<Binding> {
        let spec_list = self.base.find_child_by_type(&decl, "var_spec_list");
        let specs: Vec<Node> = self
            .base
            .named_children(&decl)
            .into_iter()
            .chain(spec_list.iter().flat_map(|list| self.base.named_children(list)))
            .filter(|n| n.kind() == spec_kind)
            .collect();
        let grouped = self.base.has_token(&decl, "(") || spec_list.is_some();
        let group = grouped.then(|| {
            Span::new(decl.start_byte(), decl.end_byte()).with_line(decl.start_position().row + 1)
        });
        let decl_comment = self.base.find_doc_comment(&decl);

        let mut bindings = Vec::new();
        for spec in specs {
            let span = self.base.span(&spec);
            let comment = if grouped {
                self.base.find_doc_comment(&spec)
            } else {
                decl_comment.clone()
            };
            let ty = spec.child_by_field_name("type").map(|t| self.type_ref(&t));
            let values: Vec<String> = spec
                .child_by_field_name("value")
                .map(|list| {
                    self.base
                        .named_children(&list)
                        .iter()
                        .map(|v| self.base.get_node_text(v))
                        .collect()
                })
                .unwrap_or_default();

            for (i, name) in self.base.get_field_texts(&spec, "name").into_iter().enumerate() {
                let mut binding = Binding::new(name);
                binding.exported = is_upper_exported(&binding.name);
                binding.ty = ty.clone();
                binding.value = values.get(i).cloned();
                binding.comment = comment.clone();
                binding.span = span.clone();
                binding.group = group.clone();
                bindings.push(binding);
            }
        }
        bindings
    }
}
