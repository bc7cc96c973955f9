/// Helper utilities for the Rust extractor
/// - Impl block tracking
/// - Visibility and attribute extraction
/// - Type references and generics
use crate::extractors::base::BaseExtractor;
use crate::graph::{base_type_name, Parameter, TypeKind, TypeParam, TypeRef};
use tree_sitter::Node;

/// Information about an impl block (stored by byte range for safety)
#[derive(Debug, Clone)]
pub struct ImplBlockInfo {
    /// Byte range of the impl block in the source file (safe to store)
    pub start_byte: usize,
    pub end_byte: usize,
    /// Base name of the implementing type (`Stack` for `impl<T> Stack<T>`)
    pub type_name: String,
    /// Trait as written for `impl Trait for Type`
    pub trait_name: Option<String>,
}

/// Whether the item carries a visibility modifier (`pub`, `pub(crate)`, ...)
pub(super) fn is_public(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind() == "visibility_modifier");
    found
}

/// Get preceding attributes (like #[derive(...)]) for a node
pub(super) fn get_preceding_attributes(node: Node) -> Vec<Node> {
    let mut attributes = Vec::new();
    let mut current = node.prev_named_sibling();
    while let Some(sibling) = current {
        match sibling.kind() {
            "attribute_item" => attributes.insert(0, sibling),
            // doc comments may interleave with attributes
            "line_comment" | "block_comment" => {}
            _ => break,
        }
        current = sibling.prev_named_sibling();
    }
    attributes
}

/// Attribute text joined one per line, `None` without attributes
pub(super) fn attribute_text(base: &BaseExtractor, node: Node) -> Option<String> {
    let attributes = get_preceding_attributes(node);
    if attributes.is_empty() {
        return None;
    }
    Some(
        attributes
            .iter()
            .map(|a| base.get_node_text(a))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Resolve a type node into its syntactic shape
///
/// Standard collections map onto container kinds: `Vec<T>` is a slice of
/// `T`, `HashMap<K, V>` a map, `mpsc::Sender<T>` a channel.
pub(super) fn type_ref(base: &BaseExtractor, node: Node) -> TypeRef {
    let mut type_ref = TypeRef::named(base.get_node_text(&node));

    match node.kind() {
        "reference_type" | "pointer_type" => {
            if let Some(inner) = node.child_by_field_name("type") {
                let inner_ref = type_ref_shape(base, inner);
                type_ref.kind = inner_ref.kind;
                type_ref.package = inner_ref.package;
                type_ref.key = inner_ref.key;
                type_ref.component = inner_ref.component;
            }
            type_ref.pointer = true;
        }
        _ => {
            let shape = type_ref_shape(base, node);
            type_ref.kind = shape.kind;
            type_ref.package = shape.package;
            type_ref.key = shape.key;
            type_ref.component = shape.component;
        }
    }
    type_ref
}

fn type_ref_shape(base: &BaseExtractor, node: Node) -> TypeRef {
    let mut shape = TypeRef::named(base.get_node_text(&node));
    match node.kind() {
        "array_type" => {
            shape.kind = TypeKind::Slice;
            shape.component = base.get_field_text(&node, "element");
        }
        "function_type" => shape.kind = TypeKind::Func,
        "scoped_type_identifier" => shape.package = base.get_field_text(&node, "path"),
        "generic_type" => {
            let Some(head) = node.child_by_field_name("type") else {
                return shape;
            };
            if head.kind() == "scoped_type_identifier" {
                shape.package = base.get_field_text(&head, "path");
            }
            let args: Vec<String> = node
                .child_by_field_name("type_arguments")
                .map(|list| {
                    base.named_children(&list)
                        .iter()
                        .map(|a| base.get_node_text(a))
                        .collect()
                })
                .unwrap_or_default();

            match base_type_name(&base.get_node_text(&head)).as_str() {
                "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "BinaryHeap" => {
                    shape.kind = TypeKind::Slice;
                    shape.component = args.first().cloned();
                }
                "HashMap" | "BTreeMap" | "IndexMap" => {
                    shape.kind = TypeKind::Map;
                    shape.key = args.first().cloned();
                    shape.component = args.get(1).cloned();
                }
                "Sender" | "SyncSender" | "Receiver" | "UnboundedSender" | "UnboundedReceiver" => {
                    shape.kind = TypeKind::Chan;
                    shape.component = args.first().cloned();
                }
                _ => {}
            }
        }
        "dynamic_type" | "abstract_type" => shape.kind = TypeKind::Interface,
        _ => {}
    }
    shape
}

/// `<T: Clone, 'a, const N: usize>` on items and impls
pub(super) fn type_params(base: &BaseExtractor, node: Node) -> Vec<TypeParam> {
    let Some(list) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    base.named_children(&list)
        .into_iter()
        .filter_map(|param| match param.kind() {
            "type_parameter" | "const_parameter" => {
                let name = base.get_field_text(&param, "name")?;
                let constraint = base
                    .get_field_text(&param, "bounds")
                    .or_else(|| base.get_field_text(&param, "type"))
                    .map(|b| b.trim_start_matches(':').trim().to_string())
                    .unwrap_or_default();
                Some(TypeParam::new(name, constraint))
            }
            "constrained_type_parameter" => {
                let name = base.get_field_text(&param, "left")?;
                let constraint = base
                    .get_field_text(&param, "bounds")
                    .map(|b| b.trim_start_matches(':').trim().to_string())
                    .unwrap_or_default();
                Some(TypeParam::new(name, constraint))
            }
            "type_identifier" | "lifetime" | "lifetime_parameter" => {
                Some(TypeParam::new(base.get_node_text(&param), ""))
            }
            _ => None,
        })
        .collect()
}

/// Parameters without the receiver; the flag reports whether a `self`
/// parameter was present
pub(super) fn parameters(base: &BaseExtractor, node: Node) -> (Vec<Parameter>, bool) {
    let Some(list) = node.child_by_field_name("parameters") else {
        return (Vec::new(), false);
    };
    let mut has_self = false;
    let mut params = Vec::new();
    for child in base.named_children(&list) {
        match child.kind() {
            "self_parameter" => has_self = true,
            "parameter" => {
                let name = base.get_field_text(&child, "pattern").unwrap_or_default();
                let ty = child
                    .child_by_field_name("type")
                    .map(|t| type_ref(base, t))
                    .unwrap_or_default();
                params.push(Parameter::new(name, ty));
            }
            _ => {}
        }
    }
    (params, has_self)
}

pub(super) fn return_type(base: &BaseExtractor, node: Node) -> Vec<Parameter> {
    node.child_by_field_name("return_type")
        .map(|t| vec![Parameter::new("", type_ref(base, t))])
        .unwrap_or_default()
}

/// Item text up to its body, or the whole item minus `;` when it has none
pub(super) fn signature_text(base: &BaseExtractor, node: Node) -> String {
    let end = node
        .child_by_field_name("body")
        .map(|body| body.start_byte())
        .unwrap_or_else(|| node.end_byte());
    base.content
        .get(node.start_byte()..end)
        .unwrap_or_default()
        .trim()
        .trim_end_matches(';')
        .trim()
        .to_string()
}
