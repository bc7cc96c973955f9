/// Function and method extraction
/// Handles sync and async definitions, decorated or not
use super::helpers;
use crate::extractors::base::BaseExtractor;
use crate::graph::{Function, Parameter, TypeParam};
use tree_sitter::Node;

/// Module-level function
pub(super) fn extract_function(base: &BaseExtractor, node: Node) -> Function {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut function = Function::new(name);
    fill_callable(base, node, &mut function);
    function
}

/// Method defined in a class body
///
/// The implicit first parameter (`self`, `cls`) is dropped unless the method
/// is a `@staticmethod`.
pub(super) fn extract_method(base: &BaseExtractor, node: Node, class: &str) -> Function {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut method = Function::method(class, name);
    fill_callable(base, node, &mut method);

    let decorators = helpers::decorator_names(base, &node);
    let is_staticmethod = decorators.iter().any(|d| d == "staticmethod");
    method.is_static = is_staticmethod || decorators.iter().any(|d| d == "classmethod");
    if !is_staticmethod && !method.parameters.is_empty() {
        method.parameters.remove(0);
    }
    method.is_constructor = method.name == "__init__";
    method
}

fn fill_callable(base: &BaseExtractor, node: Node, function: &mut Function) {
    function.parameters = node
        .child_by_field_name("parameters")
        .map(|list| helpers::parameters(base, &list))
        .unwrap_or_default();
    function.results = base
        .get_field_text(&node, "return_type")
        .map(|t| vec![Parameter::new("", helpers::type_ref(&t))])
        .unwrap_or_default();
    if let Some(params) = node.child_by_field_name("type_parameters") {
        function.type_params = base
            .named_children(&params)
            .iter()
            .map(|p| TypeParam::new(base.get_node_text(p), ""))
            .collect();
    }
    function.signature = signature_text(base, node);
    function.body = node.child_by_field_name("body").map(|b| base.span(&b));
    function.span = base.span(&node);
    function.comment = helpers::definition_comment(base, &node);
    function.annotation = helpers::decorator_text(base, &node);
    function.exported = helpers::is_exported(&function.name);
}

/// `def name(params) -> T` without the trailing colon
fn signature_text(base: &BaseExtractor, node: Node) -> String {
    let end = node
        .child_by_field_name("body")
        .map(|body| body.start_byte())
        .unwrap_or_else(|| node.end_byte());
    base.content
        .get(node.start_byte()..end)
        .unwrap_or_default()
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_string()
}
