mod functions;
mod helpers;
mod specs;
mod types;


use std::collections::HashMap;
use tracing::debug;
use tree_sitter::Node;

use crate::config::InspectConfig;
use crate::extractors::base::BaseExtractor;
use crate::extractors::Inspector;
use crate::graph::{Comment, File, Function};
use crate::language::Language;
use crate::repository::ProjectInfo;
use crate::utils::paths;

/// Go front-end
///
/// Handles structs (including embedded and tagged fields), interfaces with
/// method sets and union elements, generics, container and alias
/// definitions, grouped const/var/type blocks, imports, and methods whose
/// receiver type may be declared later in the file or not at all.
#[derive(Debug, Clone, Default)]
pub struct GoInspector {
    config: InspectConfig,
}

impl GoInspector {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }
}

impl Inspector for GoInspector {
    fn language(&self) -> Language {
        Language::Go
    }

    fn config(&self) -> &InspectConfig {
        &self.config
    }

    fn extract(&self, path: &str, source: &[u8]) -> anyhow::Result<File> {
        GoExtractor::new(path, source)?.extract()
    }

    /// `go.mod` module path joined with the package directory
    fn import_path(&self, rel_dir: &str, info: &ProjectInfo) -> String {
        match info.module.as_deref() {
            Some(module) => paths::join_unix(module, rel_dir).trim_end_matches('/').to_string(),
            None if rel_dir.is_empty() => info.name.clone(),
            None => rel_dir.to_string(),
        }
    }
}

/// Top-level declarations bucketed by category, in file order
#[derive(Default)]
struct Declarations<'t> {
    package: Option<Node<'t>>,
    imports: Vec<Node<'t>>,
    consts: Vec<Node<'t>>,
    vars: Vec<Node<'t>>,
    /// `type_spec` / `type_alias` nodes
    types: Vec<Node<'t>>,
    functions: Vec<Node<'t>>,
    methods: Vec<Node<'t>>,
    /// Doc comment per type name; an individual comment beats its group's
    type_comments: HashMap<String, Comment>,
}

/// Per-call extraction state for one Go file
pub(crate) struct GoExtractor {
    base: BaseExtractor,
    /// Local import name → import path
    imports: HashMap<String, String>,
    file: File,
}

impl GoExtractor {
    pub(crate) fn new(path: &str, source: &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            base: BaseExtractor::new(Language::Go, path, source)?,
            imports: HashMap::new(),
            file: File::new(path),
        })
    }

    pub(crate) fn extract(mut self) -> anyhow::Result<File> {
        let tree = self.base.parse()?;
        let root = tree.root_node();

        let decls = self.collect_declarations(root);

        if let Some(package) = decls.package {
            self.extract_package(package);
        }
        for node in &decls.imports {
            self.extract_imports(*node);
        }
        for node in &decls.consts {
            self.extract_const_declaration(*node);
        }
        for node in &decls.vars {
            self.extract_var_declaration(*node);
        }
        for node in &decls.types {
            let ty = self.resolve_type(*node, &decls.type_comments);
            self.file.add_type(ty);
        }
        for node in &decls.functions {
            let function = self.extract_function(*node);
            self.file.add_function(function);
        }

        // Deferred receiver binding: every type declared in the file is
        // known by now, so a missing receiver is genuinely synthetic
        let methods: Vec<Function> = decls.methods.iter().map(|n| self.extract_method(*n)).collect();
        for method in methods {
            self.bind_method(method);
        }

        debug!(
            "Extracted {} types, {} functions, {} constants, {} variables from {}",
            self.file.types().len(),
            self.file.functions().len(),
            self.file.constants().len(),
            self.file.variables().len(),
            if self.base.file_path.is_empty() { "<source>" } else { &self.base.file_path }
        );
        Ok(self.file)
    }

    /// Declaration collection pass
    fn collect_declarations<'t>(&self, root: Node<'t>) -> Declarations<'t> {
        let mut decls = Declarations::default();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "package_clause" => decls.package = Some(child),
                "import_declaration" => decls.imports.push(child),
                "const_declaration" => decls.consts.push(child),
                "var_declaration" => decls.vars.push(child),
                "type_declaration" => self.collect_type_declaration(child, &mut decls),
                "function_declaration" => decls.functions.push(child),
                "method_declaration" => decls.methods.push(child),
                _ => {}
            }
        }
        decls
    }

    fn collect_type_declaration<'t>(&self, node: Node<'t>, decls: &mut Declarations<'t>) {
        let group_comment = self.base.find_doc_comment(&node);
        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let Some(name) = self.base.get_field_text(&spec, "name") else {
                continue;
            };
            let comment = self
                .base
                .find_doc_comment(&spec)
                .or_else(|| group_comment.clone());
            if let Some(comment) = comment {
                decls.type_comments.insert(name, comment);
            }
            decls.types.push(spec);
        }
    }

    fn extract_package(&mut self, node: Node) {
        if let Some(name) = self.base.find_child_by_type(&node, "package_identifier") {
            self.file.package = self.base.get_node_text(&name);
        }
        self.file.header = Some(self.base.span(&node));
        self.file.comment = self.base.find_doc_comment(&node);
    }

    fn bind_method(&mut self, method: Function) {
        let receiver = method.receiver.clone().unwrap_or_default();
        match self.file.type_or_synthetic(&receiver) {
            Some(mut ty) => {
                ty.add_method(method);
            }
            None => debug!(
                "Dropping method {} with unresolvable receiver in {}",
                method.name, self.base.file_path
            ),
        }
    }
}
