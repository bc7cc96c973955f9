/// Rust type and item extraction
/// - Structs, unions, enums, traits, type aliases
/// - Constants and statics
/// - Use declarations and module docs
use super::functions::extract_signature_method;
use super::helpers::{attribute_text, get_preceding_attributes, is_public, type_params, type_ref};
use crate::extractors::base::BaseExtractor;
use crate::graph::{Binding, Comment, Field, Import, Type, TypeKind, TypeRef};
use tree_sitter::Node;

fn new_type(base: &BaseExtractor, node: Node, kind: TypeKind) -> Type {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut ty = Type::new(name, kind);
    ty.exported = is_public(node);
    ty.type_params = type_params(base, node);
    ty.location = base.span(&node);
    ty.comment = base.find_doc_comment(&node);
    let attributes = get_preceding_attributes(node);
    if let (Some(first), Some(last), Some(text)) =
        (attributes.first(), attributes.last(), attribute_text(base, node))
    {
        let span = base.span_between(first, last);
        ty.annotation = Some(Comment::parsed(text, span));
    }
    ty
}

/// Named fields keep their names; tuple fields are named by position
pub(super) fn extract_struct(base: &BaseExtractor, node: Node) -> Type {
    let mut ty = new_type(base, node, TypeKind::Struct);
    if let Some(body) = node.child_by_field_name("body") {
        for field in extract_fields(base, body) {
            ty.add_field(field);
        }
    }
    ty
}

fn extract_fields(base: &BaseExtractor, body: Node) -> Vec<Field> {
    match body.kind() {
        "field_declaration_list" => base
            .named_children(&body)
            .into_iter()
            .filter(|c| c.kind() == "field_declaration")
            .map(|decl| {
                let name = base.get_field_text(&decl, "name").unwrap_or_default();
                let ty = decl
                    .child_by_field_name("type")
                    .map(|t| type_ref(base, t))
                    .unwrap_or_default();
                let mut field = Field::new(name, ty);
                field.exported = is_public(decl);
                field.span = base.span(&decl);
                field.comment = base.find_doc_comment(&decl);
                field.annotation = attribute_text(base, decl);
                field
            })
            .collect(),
        "ordered_field_declaration_list" => {
            let exported = is_public(body);
            let mut cursor = body.walk();
            let fields = body
                .children_by_field_name("type", &mut cursor)
                .enumerate()
                .map(|(position, type_node)| {
                    let mut field = Field::new(position.to_string(), type_ref(base, type_node));
                    field.exported = exported;
                    field.span = base.span(&type_node);
                    field
                })
                .collect();
            fields
        }
        _ => Vec::new(),
    }
}

/// Variants become fields named after the variant; the field type holds
/// the variant payload as written
pub(super) fn extract_enum(base: &BaseExtractor, node: Node) -> Type {
    let mut ty = new_type(base, node, TypeKind::Enum);
    let exported = ty.exported;
    let Some(body) = node.child_by_field_name("body") else {
        return ty;
    };
    for variant in base.named_children(&body) {
        if variant.kind() != "enum_variant" {
            continue;
        }
        let name = base.get_field_text(&variant, "name").unwrap_or_default();
        let payload = variant
            .child_by_field_name("body")
            .map(|b| base.get_node_text(&b))
            .unwrap_or_default();
        let mut field = Field::new(name, TypeRef::named(payload));
        field.exported = exported;
        field.is_constant = true;
        field.span = base.span(&variant);
        field.comment = base.find_doc_comment(&variant);
        field.annotation = attribute_text(base, variant);
        ty.add_field(field);
    }
    ty
}

/// Traits are interfaces: required and provided methods become methods,
/// supertraits are recorded as `extends`
pub(super) fn extract_trait(base: &BaseExtractor, node: Node) -> Type {
    let mut ty = new_type(base, node, TypeKind::Interface);

    if let Some(bounds) = node.child_by_field_name("bounds") {
        for bound in base.named_children(&bounds) {
            ty.add_extends(base.get_node_text(&bound));
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        for item in base.named_children(&body) {
            if matches!(item.kind(), "function_signature_item" | "function_item") {
                let mut method = extract_signature_method(base, item, &ty.name);
                method.exported = ty.exported;
                ty.add_method(method);
            }
        }
    }
    ty
}

pub(super) fn extract_type_alias(base: &BaseExtractor, node: Node) -> Type {
    let mut ty = new_type(base, node, TypeKind::Alias);
    if let Some(target) = node.child_by_field_name("type") {
        let shape = type_ref(base, target);
        if shape.kind.is_container() {
            ty.kind = shape.kind;
            ty.key_type = shape.key;
            ty.component_type = shape.component;
        }
        ty.is_pointer = shape.pointer;
        ty.alias_of = Some(shape.name);
    }
    if ty.comment.is_none() {
        if let Some(target) = &ty.alias_of {
            ty.comment = Some(Comment::synthesized(format!(
                "{} is a type alias for {}",
                ty.name, target
            )));
        }
    }
    ty
}

/// `const` and `static` items; the span covers the whole item
pub(super) fn extract_binding(base: &BaseExtractor, node: Node) -> Binding {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut binding = Binding::new(name);
    binding.exported = is_public(node);
    binding.ty = node.child_by_field_name("type").map(|t| type_ref(base, t));
    binding.value = base.get_field_text(&node, "value");
    binding.comment = base.find_doc_comment(&node);
    binding.span = base.span(&node);
    binding
}

/// One import per `use` declaration; `use a::b as c` records the alias
pub(super) fn extract_use(base: &BaseExtractor, node: Node) -> Vec<Import> {
    let Some(argument) = node.child_by_field_name("argument") else {
        return Vec::new();
    };
    let mut import = if argument.kind() == "use_as_clause" {
        let mut import = Import::new(base.get_field_text(&argument, "path").unwrap_or_default());
        import.alias = base.get_field_text(&argument, "alias");
        import
    } else {
        Import::new(base.get_node_text(&argument))
    };
    import.span = base.span(&node);
    vec![import]
}

/// Leading `//!` inner doc comments of the file
pub(super) fn extract_module_doc(base: &BaseExtractor, root: Node) -> Option<Comment> {
    let mut cursor = root.walk();
    let docs: Vec<Node> = root
        .named_children(&mut cursor)
        .take_while(|c| c.kind() == "line_comment" && base.get_node_text(c).starts_with("//!"))
        .collect();
    let (first, last) = (docs.first()?, docs.last()?);
    let span = base.span_between(first, last);
    Some(Comment::parsed(span.text.clone().unwrap_or_default(), span))
}
