//! Rust front-end with support for:
//! - Structs (named and tuple), enums, traits
//! - Functions, impl blocks (inherent and trait)
//! - Type aliases, constants, statics, use declarations
//! - Two-phase processing: extract items → process impl blocks

use crate::config::InspectConfig;
use crate::extractors::base::BaseExtractor;
use crate::extractors::Inspector;
use crate::graph::File;
use crate::language::Language;
use crate::repository::ProjectInfo;
use tracing::debug;
use tree_sitter::{Node, Tree};

// Private modules
mod functions;
mod helpers;
mod types;

#[cfg(test)]
mod tests;

pub use self::helpers::ImplBlockInfo;

#[derive(Debug, Clone, Default)]
pub struct RustInspector {
    config: InspectConfig,
}

impl RustInspector {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }
}

impl Inspector for RustInspector {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn config(&self) -> &InspectConfig {
        &self.config
    }

    fn extract(&self, path: &str, source: &[u8]) -> anyhow::Result<File> {
        let mut extractor = RustExtractor::new(path, source)?;
        let tree = extractor.base.parse()?;
        extractor.extract_items(&tree);
        Ok(extractor.file)
    }

    /// `crate::a::b` for `src/a/b`; the crate root maps to `crate`
    fn import_path(&self, rel_dir: &str, _info: &ProjectInfo) -> String {
        let segments: Vec<&str> = rel_dir
            .split('/')
            .filter(|s| !s.is_empty())
            .skip_while(|s| *s == "src")
            .collect();
        if segments.is_empty() {
            "crate".to_string()
        } else {
            format!("crate::{}", segments.join("::"))
        }
    }
}

/// Rust extractor that handles Rust-specific constructs
pub struct RustExtractor {
    base: BaseExtractor,
    file: File,
    impl_blocks: Vec<ImplBlockInfo>,
}

impl RustExtractor {
    pub fn new(path: &str, source: &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            base: BaseExtractor::new(Language::Rust, path, source)?,
            file: File::new(path),
            impl_blocks: Vec::new(),
        })
    }

    /// Phase 1: every top-level item except impl methods
    /// Phase 2: impl blocks bound to their types, synthesizing missing ones
    pub fn extract_items(&mut self, tree: &Tree) {
        self.impl_blocks.clear();
        let root = tree.root_node();
        self.file.comment = types::extract_module_doc(&self.base, root);

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            self.extract_item(child);
        }

        functions::process_impl_blocks(self, tree);

        debug!(
            "Extracted {} types, {} functions, {} impl blocks from {}",
            self.file.types().len(),
            self.file.functions().len(),
            self.impl_blocks.len(),
            self.base.file_path
        );
    }

    fn extract_item(&mut self, node: Node) {
        match node.kind() {
            "struct_item" | "union_item" => {
                let ty = types::extract_struct(&self.base, node);
                self.file.add_type(ty);
            }
            "enum_item" => {
                let ty = types::extract_enum(&self.base, node);
                self.file.add_type(ty);
            }
            "trait_item" => {
                let ty = types::extract_trait(&self.base, node);
                self.file.add_type(ty);
            }
            "type_item" => {
                let ty = types::extract_type_alias(&self.base, node);
                self.file.add_type(ty);
            }
            "const_item" => {
                let constant = types::extract_binding(&self.base, node);
                self.file.add_constant(constant);
            }
            "static_item" => {
                let variable = types::extract_binding(&self.base, node);
                self.file.add_variable(variable);
            }
            "use_declaration" => {
                for import in types::extract_use(&self.base, node) {
                    self.file.add_import(import);
                }
            }
            "function_item" => {
                let function = functions::extract_function(&self.base, node);
                self.file.add_function(function);
            }
            "impl_item" => functions::extract_impl(self, node),
            _ => {}
        }
    }

    pub(super) fn add_impl_block(&mut self, block: ImplBlockInfo) {
        self.impl_blocks.push(block);
    }
}
