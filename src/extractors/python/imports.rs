/// Import statement extraction
/// Handles import, from...import, and aliased imports
use crate::extractors::base::BaseExtractor;
use crate::graph::Import;
use tree_sitter::Node;

/// One import per imported name; `from m import a, b` yields `m.a` and `m.b`
/// sharing the statement span
pub(super) fn extract_imports(base: &BaseExtractor, node: Node) -> Vec<Import> {
    let module = match node.kind() {
        "import_from_statement" => base.get_field_text(&node, "module_name"),
        "future_import_statement" => Some("__future__".to_string()),
        _ => None,
    };
    let span = base.span(&node);
    let qualify = |name: String| match &module {
        Some(module) if module.ends_with('.') => format!("{}{}", module, name),
        Some(module) => format!("{}.{}", module, name),
        None => name,
    };

    let mut imports = Vec::new();
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let mut import = match name.kind() {
            "aliased_import" => {
                let mut import =
                    Import::new(qualify(base.get_field_text(&name, "name").unwrap_or_default()));
                import.alias = base.get_field_text(&name, "alias");
                import
            }
            _ => Import::new(qualify(base.get_node_text(&name))),
        };
        import.span = span.clone();
        imports.push(import);
    }

    if imports.is_empty()
        && module.is_some()
        && base.find_child_by_type(&node, "wildcard_import").is_some()
    {
        let mut import = Import::new(qualify("*".to_string()));
        import.span = span;
        imports.push(import);
    }
    imports
}
