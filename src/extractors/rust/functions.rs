/// Rust function and method extraction
/// - Functions and trait method signatures
/// - Impl blocks and two-phase processing
use super::helpers::{
    attribute_text, is_public, parameters, return_type, signature_text, type_params, ImplBlockInfo,
};
use crate::extractors::base::BaseExtractor;
use crate::extractors::rust::RustExtractor;
use crate::graph::{base_type_name, Function, ImplBlock};
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Free function
pub(super) fn extract_function(base: &BaseExtractor, node: Node) -> Function {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut function = Function::new(name);
    fill_callable(base, node, &mut function);
    function.is_constructor = function.name == "new";
    function
}

/// Trait method: a signature, or a provided method with a default body
pub(super) fn extract_signature_method(base: &BaseExtractor, node: Node, owner: &str) -> Function {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut method = Function::method(owner, name);
    let has_self = fill_callable(base, node, &mut method);
    method.is_static = !has_self;
    method
}

/// Shared by functions and methods; returns whether a `self` parameter exists
fn fill_callable(base: &BaseExtractor, node: Node, function: &mut Function) -> bool {
    let (params, has_self) = parameters(base, node);
    function.parameters = params;
    function.results = return_type(base, node);
    function.type_params = type_params(base, node);
    function.signature = signature_text(base, node);
    function.body = node.child_by_field_name("body").map(|b| base.span(&b));
    function.span = base.span(&node);
    function.comment = base.find_doc_comment(&node);
    function.annotation = attribute_text(base, node);
    function.exported = is_public(node);
    has_self
}

/// Store impl block info for phase 2 processing
pub(super) fn extract_impl(extractor: &mut RustExtractor, node: Node) {
    let base = &extractor.base;
    let type_text = base.get_field_text(&node, "type").unwrap_or_default();
    let trait_name = base.get_field_text(&node, "trait");

    // Store byte ranges instead of Node references
    extractor.add_impl_block(ImplBlockInfo {
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        type_name: base_type_name(&type_text),
        trait_name,
    });
}

/// Process impl blocks during phase 2
///
/// Every method binds to the implementing type through the file's single
/// resolve-or-insert point, so an impl for a type declared later, or in
/// another file, yields exactly one synthetic type.
pub(super) fn process_impl_blocks(extractor: &mut RustExtractor, tree: &Tree) {
    let impl_blocks = extractor.impl_blocks.clone();

    for impl_block in impl_blocks {
        if impl_block.type_name.is_empty() {
            debug!(
                "Skipping impl block for non-nominal type at byte {} in {}",
                impl_block.start_byte, extractor.base.file_path
            );
            continue;
        }

        // Reconstruct node from byte range using the tree
        let Some(node) = tree
            .root_node()
            .descendant_for_byte_range(impl_block.start_byte, impl_block.end_byte)
            .filter(|n| n.kind() == "impl_item")
        else {
            continue;
        };

        let Some(body) = node.child_by_field_name("body") else {
            continue;
        };
        let mut methods: Vec<Function> = Vec::new();
        let mut block = ImplBlock {
            interface: impl_block.trait_name.clone(),
            header: impl_header(&extractor.base, node, body),
            items: Vec::new(),
        };
        for item in extractor.base.named_children(&body) {
            match item.kind() {
                "function_item" => {
                    methods.push(extract_impl_method(&extractor.base, item, &impl_block))
                }
                // comments and attributes travel with the methods
                "line_comment" | "block_comment" | "attribute_item" => {}
                _ => block.items.push(extractor.base.span(&item)),
            }
        }

        let Some(mut ty) = extractor.file.type_or_synthetic(&impl_block.type_name) else {
            continue;
        };
        if let Some(trait_name) = &impl_block.trait_name {
            ty.add_implements(trait_name.clone());
        }
        if ty.synthetic && ty.type_params.is_empty() {
            ty.type_params = type_params(&extractor.base, node);
        }
        ty.add_impl_block(block);
        for method in methods {
            ty.add_method(method);
        }
    }
}

/// `impl<T> Trait for Type<T> where ...`, without the body
fn impl_header(base: &BaseExtractor, node: Node, body: Node) -> Option<String> {
    let header = base.content.get(node.start_byte()..body.start_byte())?.trim_end();
    (!header.is_empty()).then(|| header.to_string())
}

fn extract_impl_method(base: &BaseExtractor, node: Node, impl_block: &ImplBlockInfo) -> Function {
    let name = base.get_field_text(&node, "name").unwrap_or_default();
    let mut method = Function::method(impl_block.type_name.clone(), name);
    let has_self = fill_callable(base, node, &mut method);
    method.is_static = !has_self;
    method.is_constructor = method.name == "new";
    method.interface = impl_block.trait_name.clone();
    // trait methods are as visible as the trait itself
    method.exported = method.exported || impl_block.trait_name.is_some();
    method
}
