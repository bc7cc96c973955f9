use tree_sitter::Node;

use crate::graph::{Parameter, TypeKind, TypeParam, TypeRef};

/// Type-reference and parameter helpers for Go
impl super::GoExtractor {
    /// Resolve a type node into its syntactic shape
    ///
    /// Containers carry key/element names as text; qualified names resolve
    /// their package path through the file's import map.
    pub(super) fn type_ref(&self, node: &Node) -> TypeRef {
        let mut type_ref = TypeRef::named(self.base.get_node_text(node));

        match node.kind() {
            "pointer_type" => {
                if let Some(inner) = node.named_child(0) {
                    let inner_ref = self.type_ref(&inner);
                    type_ref.kind = inner_ref.kind;
                    type_ref.package = inner_ref.package;
                    type_ref.pkg_path = inner_ref.pkg_path;
                    type_ref.key = inner_ref.key;
                    type_ref.component = inner_ref.component;
                }
                type_ref.pointer = true;
            }
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                type_ref.kind = TypeKind::Slice;
                type_ref.component = self.base.get_field_text(node, "element");
            }
            "map_type" => {
                type_ref.kind = TypeKind::Map;
                type_ref.key = self.base.get_field_text(node, "key");
                type_ref.component = self.base.get_field_text(node, "value");
            }
            "channel_type" => {
                type_ref.kind = TypeKind::Chan;
                type_ref.component = self.base.get_field_text(node, "value");
            }
            "function_type" => type_ref.kind = TypeKind::Func,
            "struct_type" => type_ref.kind = TypeKind::Struct,
            "interface_type" => type_ref.kind = TypeKind::Interface,
            "qualified_type" => {
                if let Some(package) = self.base.get_field_text(node, "package") {
                    type_ref.pkg_path = self.imports.get(&package).cloned();
                    type_ref.package = Some(package);
                }
            }
            "generic_type" => {
                if let Some(base) = node.child_by_field_name("type") {
                    let base_ref = self.type_ref(&base);
                    type_ref.package = base_ref.package;
                    type_ref.pkg_path = base_ref.pkg_path;
                }
            }
            "parenthesized_type" => {
                if let Some(inner) = node.named_child(0) {
                    return self.type_ref(&inner);
                }
            }
            _ => {}
        }
        type_ref
    }

    /// `[K comparable, V any]` on types and functions
    pub(super) fn type_params(&self, node: &Node) -> Vec<TypeParam> {
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };
        let mut params = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            if !matches!(
                decl.kind(),
                "type_parameter_declaration" | "parameter_declaration"
            ) {
                continue;
            }
            let constraint = self.base.get_field_text(&decl, "type").unwrap_or_default();
            for name in self.base.get_field_texts(&decl, "name") {
                params.push(TypeParam::new(name, constraint.clone()));
            }
        }
        params
    }

    /// Parameters of a `parameter_list`; unnamed parameters get an empty name
    pub(super) fn parameters(&self, list: &Node) -> Vec<Parameter> {
        let mut params = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            let Some(type_node) = decl.child_by_field_name("type") else {
                continue;
            };
            let mut ty = self.type_ref(&type_node);
            match decl.kind() {
                "parameter_declaration" => {
                    let names = self.base.get_field_texts(&decl, "name");
                    if names.is_empty() {
                        params.push(Parameter::new("", ty));
                    } else {
                        for name in names {
                            params.push(Parameter::new(name, ty.clone()));
                        }
                    }
                }
                "variadic_parameter_declaration" => {
                    ty.name = format!("...{}", ty.name);
                    ty.kind = TypeKind::Slice;
                    ty.component = Some(self.base.get_node_text(&type_node));
                    let name = self.base.get_field_text(&decl, "name").unwrap_or_default();
                    params.push(Parameter::new(name, ty));
                }
                _ => {}
            }
        }
        params
    }

    /// Results are either a parameter list or a single bare type
    pub(super) fn results(&self, node: &Node) -> Vec<Parameter> {
        match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameters(&result),
            Some(result) => vec![Parameter::new("", self.type_ref(&result))],
            None => Vec::new(),
        }
    }

    /// Source text from the start of `node` up to (excluding) its body
    pub(super) fn signature_text(&self, node: &Node) -> String {
        let end = node
            .child_by_field_name("body")
            .map(|body| body.start_byte())
            .unwrap_or_else(|| node.end_byte());
        self.base
            .content
            .get(node.start_byte()..end)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
