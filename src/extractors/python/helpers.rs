/// Helper utilities for the Python extractor
/// - Visibility by naming convention
/// - Base-class lists and decorators
/// - Type hints and docstrings
use crate::extractors::base::BaseExtractor;
use crate::graph::{Comment, Parameter, TypeKind, TypeRef};
use tree_sitter::Node;

/// Not underscore-prefixed, or a dunder such as `__init__`
pub(super) fn is_exported(name: &str) -> bool {
    !name.starts_with('_') || (name.starts_with("__") && name.ends_with("__") && name.len() > 4)
}

/// `MAX_SIZE`, `DEFAULT_2`; at least one letter, no lowercase
pub(super) fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Base classes of a class definition; keyword arguments such as
/// `metaclass=Meta` are not bases
pub(super) fn extract_bases(base: &BaseExtractor, node: &Node) -> Vec<String> {
    let Some(superclasses) = node.child_by_field_name("superclasses") else {
        return Vec::new();
    };
    base.named_children(&superclasses)
        .into_iter()
        .filter(|arg| matches!(arg.kind(), "identifier" | "attribute" | "subscript"))
        .map(|arg| base.get_node_text(&arg))
        .collect()
}

/// Decorator nodes of a definition wrapped in `decorated_definition`
pub(super) fn decorators<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let Some(parent) = node.parent().filter(|p| p.kind() == "decorated_definition") else {
        return Vec::new();
    };
    let mut cursor = parent.walk();
    let found = parent
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .collect();
    found
}

/// Decorator names without `@` or arguments: `@lru_cache(maxsize=8)` is `lru_cache`
pub(super) fn decorator_names(base: &BaseExtractor, node: &Node) -> Vec<String> {
    decorators(node)
        .iter()
        .map(|d| {
            let text = base.get_node_text(d);
            let text = text.trim_start_matches('@').trim();
            text.split('(').next().unwrap_or_default().trim().to_string()
        })
        .collect()
}

/// Decorators joined one per line, `None` without decorators
pub(super) fn decorator_text(base: &BaseExtractor, node: &Node) -> Option<String> {
    let decorators = decorators(node);
    if decorators.is_empty() {
        return None;
    }
    Some(
        decorators
            .iter()
            .map(|d| base.get_node_text(d))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// First statement of a body when it is a bare string literal
pub(super) fn docstring(base: &BaseExtractor, body: &Node) -> Option<Comment> {
    let first = base.named_children(body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = first.named_child(0).filter(|n| n.kind() == "string")?;
    let span = base.span(&literal);
    Some(Comment::parsed(base.get_node_text(&literal), span))
}

/// Docstring for a class or function, else the `#` comments above it
pub(super) fn definition_comment(base: &BaseExtractor, node: &Node) -> Option<Comment> {
    node.child_by_field_name("body")
        .and_then(|body| docstring(base, &body))
        .or_else(|| {
            let outer = node
                .parent()
                .filter(|p| p.kind() == "decorated_definition")
                .unwrap_or(*node);
            base.find_doc_comment(&outer)
        })
}

/// Resolve a type hint into its syntactic shape
///
/// `list[T]`/`List[T]`/`set[T]` are slices, `dict[K, V]` maps,
/// `Callable[...]` functions and `Queue[T]` channels.
pub(super) fn type_ref(text: &str) -> TypeRef {
    let mut type_ref = TypeRef::named(text.trim());
    let (head, args) = split_generic(text.trim());
    if let Some((package, _)) = head.rsplit_once('.') {
        type_ref.package = Some(package.to_string());
    }
    let simple = head.rsplit('.').next().unwrap_or(head);
    match simple {
        "list" | "List" | "set" | "Set" | "frozenset" | "FrozenSet" | "Sequence" | "Iterable"
        | "tuple" | "Tuple" | "deque" | "Deque" => {
            type_ref.kind = TypeKind::Slice;
            type_ref.component = args.first().cloned();
        }
        "dict" | "Dict" | "Mapping" | "MutableMapping" | "defaultdict" | "OrderedDict" => {
            type_ref.kind = TypeKind::Map;
            type_ref.key = args.first().cloned();
            type_ref.component = args.get(1).cloned();
        }
        "Callable" => type_ref.kind = TypeKind::Func,
        "Queue" | "SimpleQueue" => {
            type_ref.kind = TypeKind::Chan;
            type_ref.component = args.first().cloned();
        }
        _ => {}
    }
    type_ref
}

/// `Dict[str, List[int]]` into `Dict` and `["str", "List[int]"]`
fn split_generic(text: &str) -> (&str, Vec<String>) {
    let Some(open) = text.find('[') else {
        return (text, Vec::new());
    };
    if !text.ends_with(']') {
        return (text, Vec::new());
    }
    let inner = &text[open + 1..text.len() - 1];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        args.push(last.to_string());
    }
    (text[..open].trim(), args)
}

/// Parameters in declaration order, `*args`/`**kwargs` keep their stars
pub(super) fn parameters(base: &BaseExtractor, list: &Node) -> Vec<Parameter> {
    base.named_children(list)
        .into_iter()
        .filter_map(|param| {
            let (name, hint) = match param.kind() {
                "identifier" => (base.get_node_text(&param), None),
                "typed_parameter" => {
                    let name = param.named_child(0).map(|n| base.get_node_text(&n))?;
                    (name, base.get_field_text(&param, "type"))
                }
                "default_parameter" => (base.get_field_text(&param, "name")?, None),
                "typed_default_parameter" => (
                    base.get_field_text(&param, "name")?,
                    base.get_field_text(&param, "type"),
                ),
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    (base.get_node_text(&param), None)
                }
                _ => return None,
            };
            let ty = hint.map(|h| type_ref(&h)).unwrap_or_default();
            Some(Parameter::new(name, ty))
        })
        .collect()
}
