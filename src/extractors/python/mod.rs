//! Python front-end
//!
//! This module is organized into focused sub-modules:
//! - helpers: naming conventions, decorators, docstrings, type hints
//! - types: classes with their attributes and methods
//! - functions: function and method extraction
//! - imports: import statement handling
//! - assignments: module and class level assignments

pub(crate) mod assignments;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod imports;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use crate::config::InspectConfig;
use crate::extractors::base::BaseExtractor;
use crate::extractors::{default_package_name, Inspector};
use crate::graph::{Comment, File};
use crate::language::Language;
use crate::repository::ProjectInfo;
use tracing::debug;
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Default)]
pub struct PythonInspector {
    config: InspectConfig,
}

impl PythonInspector {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }
}

impl Inspector for PythonInspector {
    fn language(&self) -> Language {
        Language::Python
    }

    fn config(&self) -> &InspectConfig {
        &self.config
    }

    fn extract(&self, path: &str, source: &[u8]) -> anyhow::Result<File> {
        let mut extractor = PythonExtractor::new(path, source)?;
        let tree = extractor.base.parse()?;
        extractor.extract_module(&tree);
        Ok(extractor.file)
    }

    /// Dotted directory path, `app.models` for `app/models`
    fn import_path(&self, rel_dir: &str, info: &ProjectInfo) -> String {
        let dotted = rel_dir
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join(".");
        if dotted.is_empty() {
            info.name.clone()
        } else {
            dotted
        }
    }

    /// Python files carry no package clause
    fn package_name(&self, _files: &[File], rel_dir: &str, info: &ProjectInfo) -> String {
        default_package_name(rel_dir, info)
    }
}

/// Python extractor for one module
pub struct PythonExtractor {
    base: BaseExtractor,
    file: File,
}

impl PythonExtractor {
    pub fn new(path: &str, source: &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            base: BaseExtractor::new(Language::Python, path, source)?,
            file: File::new(path),
        })
    }

    /// Walk module-level statements; classes carry their own methods
    pub fn extract_module(&mut self, tree: &Tree) {
        let root = tree.root_node();
        self.file.comment = self.module_docstring(root);

        for statement in self.base.named_children(&root) {
            self.extract_statement(statement);
        }

        debug!(
            "Extracted {} types, {} functions, {} constants, {} variables from {}",
            self.file.types().len(),
            self.file.functions().len(),
            self.file.constants().len(),
            self.file.variables().len(),
            self.base.file_path
        );
    }

    fn extract_statement(&mut self, node: Node) {
        match node.kind() {
            "class_definition" => {
                let ty = types::extract_class(&self.base, node);
                self.file.add_type(ty);
            }
            "function_definition" => {
                let function = functions::extract_function(&self.base, node);
                self.file.add_function(function);
            }
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.extract_statement(definition);
                }
            }
            "expression_statement" => {
                for (binding, is_constant) in assignments::extract_assignment(&self.base, node) {
                    if is_constant {
                        self.file.add_constant(binding);
                    } else {
                        self.file.add_variable(binding);
                    }
                }
            }
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                for import in imports::extract_imports(&self.base, node) {
                    self.file.add_import(import);
                }
            }
            _ => {}
        }
    }

    /// A leading string literal documents the module
    fn module_docstring(&self, root: Node) -> Option<Comment> {
        helpers::docstring(&self.base, &root)
    }
}
