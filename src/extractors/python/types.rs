/// Class extraction for Python
/// Handles classes, protocols, enums and their attributes
use super::assignments::{assignment_targets, Target};
use super::functions::extract_method;
use super::helpers;
use crate::extractors::base::BaseExtractor;
use crate::graph::{Comment, Field, Type, TypeKind, TypeParam};
use tree_sitter::Node;

/// Extract a class definition with its methods and attributes
///
/// Class-level assignments become static fields and `self.x = ...`
/// assignments in `__init__` become instance fields.
pub(super) fn extract_class(base: &BaseExtractor, node: Node) -> Type {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let bases = helpers::extract_bases(base, &node);

    let kind = if bases.iter().any(|b| b == "Protocol" || b.ends_with(".Protocol")) {
        TypeKind::Interface
    } else if bases.iter().any(|b| b.contains("Enum")) {
        TypeKind::Enum
    } else {
        TypeKind::Struct
    };

    let mut ty = Type::new(name, kind);
    ty.exported = helpers::is_exported(&ty.name);
    ty.location = base.span(&node);
    ty.comment = helpers::definition_comment(base, &node);
    if let Some(params) = node.child_by_field_name("type_parameters") {
        ty.type_params = base
            .named_children(&params)
            .iter()
            .map(|p| TypeParam::new(base.get_node_text(p), ""))
            .collect();
    }
    let decorators = helpers::decorators(&node);
    if let (Some(first), Some(last), Some(text)) = (
        decorators.first(),
        decorators.last(),
        helpers::decorator_text(base, &node),
    ) {
        ty.annotation = Some(Comment::parsed(text, base.span_between(first, last)));
    }
    for class in bases {
        ty.add_extends(class);
    }

    let Some(body) = node.child_by_field_name("body") else {
        return ty;
    };
    for statement in base.named_children(&body) {
        match statement.kind() {
            "expression_statement" => {
                for field in class_attributes(base, statement, kind == TypeKind::Enum) {
                    if !ty.fields().iter().any(|f| f.name == field.name) {
                        ty.add_field(field);
                    }
                }
            }
            "function_definition" => add_method(base, &mut ty, statement),
            "decorated_definition" => {
                if let Some(definition) = statement
                    .child_by_field_name("definition")
                    .filter(|d| d.kind() == "function_definition")
                {
                    add_method(base, &mut ty, definition);
                }
            }
            _ => {}
        }
    }
    ty
}

fn add_method(base: &BaseExtractor, ty: &mut Type, node: Node) {
    let method = extract_method(base, node, &ty.name);
    if method.is_constructor {
        if let Some(body) = node.child_by_field_name("body") {
            for field in instance_attributes(base, body) {
                if !ty.fields().iter().any(|f| f.name == field.name) {
                    ty.add_field(field);
                }
            }
        }
    }
    ty.add_method(method);
}

/// `NAME = value` and `name: int = value` at class level
fn class_attributes(base: &BaseExtractor, statement: Node, in_enum: bool) -> Vec<Field> {
    let Some(assignment) = statement
        .named_child(0)
        .filter(|n| n.kind() == "assignment")
    else {
        return Vec::new();
    };
    let comment = base.find_doc_comment(&statement);
    assignment_targets(base, assignment)
        .into_iter()
        .filter_map(|target| match target {
            Target::Name { name, hint, .. } => {
                let mut field = Field::new(name, hint.unwrap_or_default());
                field.is_static = true;
                field.is_constant = in_enum || helpers::is_constant_name(&field.name);
                field.exported = helpers::is_exported(&field.name);
                field.span = base.span(&statement);
                field.comment = comment.clone();
                Some(field)
            }
            Target::SelfAttribute { .. } => None,
        })
        .collect()
}

/// `self.x = ...` assignments directly in the constructor body
fn instance_attributes(base: &BaseExtractor, body: Node) -> Vec<Field> {
    let mut fields = Vec::new();
    for statement in base.named_children(&body) {
        let Some(assignment) = statement
            .named_child(0)
            .filter(|n| statement.kind() == "expression_statement" && n.kind() == "assignment")
        else {
            continue;
        };
        for target in assignment_targets(base, assignment) {
            if let Target::SelfAttribute { name, hint } = target {
                let mut field = Field::new(name, hint.unwrap_or_default());
                field.exported = helpers::is_exported(&field.name);
                field.span = base.span(&statement);
                field.comment = base.find_doc_comment(&statement);
                fields.push(field);
            }
        }
    }
    fields
}
