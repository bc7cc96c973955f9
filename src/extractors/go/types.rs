use std::collections::HashMap;
use tree_sitter::Node;

use crate::extractors::is_upper_exported;
use crate::graph::{Comment, Field, Function, Type, TypeKind};

/// Type declaration resolution for Go (structs, interfaces, containers, aliases)
impl super::GoExtractor {
    /// Per-type resolution of a `type_spec` or `type_alias`
    pub(super) fn resolve_type(&self, spec: Node, comments: &HashMap<String, Comment>) -> Type {
        let name = self.base.get_field_text(&spec, "name").unwrap_or_default();
        let mut ty = Type::new(name.clone(), TypeKind::Other);
        ty.exported = is_upper_exported(&name);
        ty.package = self.file.package.clone();
        ty.type_params = self.type_params(&spec);
        ty.location = self.base.span(&spec);
        ty.comment = comments.get(&name).cloned();

        let Some(def) = spec.child_by_field_name("type") else {
            return ty;
        };

        if spec.kind() == "type_alias" {
            ty.kind = TypeKind::Alias;
            ty.alias_of = Some(self.base.get_node_text(&def));
            self.describe_alias(&mut ty);
            return ty;
        }

        self.classify_definition(&mut ty, &def);
        ty
    }

    /// Shape of the right-hand side of `type Name <def>`
    fn classify_definition(&self, ty: &mut Type, def: &Node) {
        let def_text = self.base.get_node_text(def);
        match def.kind() {
            "struct_type" => {
                ty.kind = TypeKind::Struct;
                self.extract_struct_fields(ty, def);
            }
            "interface_type" => {
                ty.kind = TypeKind::Interface;
                self.extract_interface_elements(ty, def);
            }
            "slice_type" | "array_type" | "map_type" | "channel_type" => {
                let shape = self.type_ref(def);
                ty.kind = shape.kind;
                ty.key_type = shape.key;
                ty.component_type = shape.component;
                ty.alias_of = Some(def_text);
            }
            "function_type" => {
                ty.kind = TypeKind::Func;
                ty.alias_of = Some(def_text);
            }
            "pointer_type" => {
                ty.kind = TypeKind::Alias;
                ty.is_pointer = true;
                ty.alias_of = Some(def_text);
                self.describe_alias(ty);
            }
            "type_identifier" | "qualified_type" | "generic_type" | "parenthesized_type" => {
                // Definitions over a named or basic type behave like aliases
                ty.kind = TypeKind::Alias;
                ty.alias_of = Some(def_text);
                self.describe_alias(ty);
            }
            _ => {
                ty.kind = TypeKind::Other;
                ty.alias_of = Some(def_text);
            }
        }
    }

    /// Generated description, only when the source has no doc comment
    fn describe_alias(&self, ty: &mut Type) {
        if ty.comment.is_some() {
            return;
        }
        if let Some(target) = &ty.alias_of {
            ty.comment = Some(Comment::synthesized(format!(
                "{} is a type alias for {}",
                ty.name, target
            )));
        }
    }

    fn extract_struct_fields(&self, ty: &mut Type, struct_node: &Node) {
        let Some(list) = self.base.find_child_by_type(struct_node, "field_declaration_list") else {
            return;
        };
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            for field in self.extract_field_declaration(&decl) {
                ty.add_field(field);
            }
        }
    }

    /// `X, Y int "tag"` yields two fields; a declaration without names is
    /// an embedded field named after its type
    fn extract_field_declaration(&self, decl: &Node) -> Vec<Field> {
        let Some(type_node) = decl.child_by_field_name("type") else {
            return Vec::new();
        };
        let span = self.base.span(decl);
        let comment = self.base.find_doc_comment(decl);
        let tag = self.base.get_field_text(decl, "tag");
        let names = self.base.get_field_texts(decl, "name");

        if names.is_empty() {
            let mut type_ref = self.type_ref(&type_node);
            if self.base.has_token(decl, "*") {
                type_ref.name = format!("*{}", type_ref.name);
                type_ref.pointer = true;
            }
            let mut field = Field::embedded(type_ref);
            field.tag = tag;
            field.span = span;
            field.comment = comment;
            return vec![field];
        }

        let type_ref = self.type_ref(&type_node);
        names
            .into_iter()
            .map(|name| {
                let mut field = Field::new(name, type_ref.clone());
                field.exported = is_upper_exported(&field.name);
                field.tag = tag.clone();
                field.span = span.clone();
                field.comment = comment.clone();
                field
            })
            .collect()
    }

    /// Method elements become methods; embedded interfaces and type-set
    /// unions are recorded as `extends`
    fn extract_interface_elements(&self, ty: &mut Type, iface: &Node) {
        let mut cursor = iface.walk();
        for elem in iface.named_children(&mut cursor) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.base.get_field_text(&elem, "name").unwrap_or_default();
                    let mut method = Function::method(ty.name.clone(), name);
                    if let Some(params) = elem.child_by_field_name("parameters") {
                        method.parameters = self.parameters(&params);
                    }
                    method.results = self.results(&elem);
                    method.signature = self.base.get_node_text(&elem);
                    method.span = self.base.span(&elem);
                    method.comment = self.base.find_doc_comment(&elem);
                    ty.add_method(method);
                }
                "type_elem" | "constraint_elem" => {
                    for member in self.base.named_children(&elem) {
                        ty.add_extends(self.base.get_node_text(&member));
                    }
                }
                "interface_type_name" | "type_identifier" | "qualified_type" | "generic_type" => {
                    ty.add_extends(self.base.get_node_text(&elem));
                }
                _ => {}
            }
        }
    }
}
