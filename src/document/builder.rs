//! Project → documents
//!
//! Content comes from the language's emitter hooks, so a document carries
//! the same text the reconstructor would write (comments and annotations
//! included). Types without fields are held back until the whole project
//! has been seen: a type name may appear both as a declaration with fields
//! and as a field-less receiver placeholder, and only the former is kept.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::{chunk, Document, DocumentKind, ASSET_SIZE_LIMIT};
use crate::emitter::{self, Emitter};
use crate::graph::{Asset, Binding, Field, File, Package, Project, Type};

/// Every document of `project`, oversized ones already split
pub fn build_documents(project: &Project) -> Vec<Document> {
    let documents = DocumentBuilder::new(project).collect();
    chunk::split_all(documents)
}

struct DocumentBuilder<'p> {
    project: &'p Project,
    documents: Vec<Document>,
    /// Field-less types in discovery order, with their synthetic flag
    deferred: Vec<((String, String), bool, Document)>,
    /// (import path, name) of types already emitted with fields
    emitted: HashSet<(String, String)>,
}

impl<'p> DocumentBuilder<'p> {
    fn new(project: &'p Project) -> Self {
        Self {
            project,
            documents: Vec::new(),
            deferred: Vec::new(),
            emitted: HashSet::new(),
        }
    }

    fn collect(mut self) -> Vec<Document> {
        let project = self.project;
        for package in project.packages() {
            for file in package.files() {
                match emitter::for_path(&file.path) {
                    Some(emitter) => self.add_file(package, file, emitter.as_ref()),
                    None => debug!("No emitter for {}, no documents", file.path),
                }
            }
            for asset in package.assets() {
                if let Some(document) = self.asset_document(package, asset) {
                    self.documents.push(document);
                }
            }
        }

        // one document per remaining name, a declaration beating a placeholder
        let mut chosen: HashMap<(String, String), usize> = HashMap::new();
        let mut remaining: Vec<(bool, Document)> = Vec::new();
        for (key, synthetic, document) in std::mem::take(&mut self.deferred) {
            if self.emitted.contains(&key) {
                continue;
            }
            match chosen.get(&key) {
                Some(&index) if remaining[index].0 && !synthetic => {
                    remaining[index] = (synthetic, document);
                }
                Some(_) => {}
                None => {
                    chosen.insert(key, remaining.len());
                    remaining.push((synthetic, document));
                }
            }
        }
        self.documents
            .extend(remaining.into_iter().map(|(_, document)| document));

        debug!(
            "Built {} documents for project '{}'",
            self.documents.len(),
            project.name
        );
        self.documents
    }

    fn add_file(&mut self, package: &Package, file: &File, emitter: &dyn Emitter) {
        for constant in file.constants() {
            let content = emitter.render_bindings(std::slice::from_ref(constant), true);
            let document = self.binding_document(DocumentKind::Constant, package, file, constant, content);
            self.documents.push(document);
        }
        for variable in file.variables() {
            let content = emitter.render_bindings(std::slice::from_ref(variable), false);
            let document = self.binding_document(DocumentKind::Variable, package, file, variable, content);
            self.documents.push(document);
        }
        for function in file.functions() {
            let mut document = self.document(
                DocumentKind::Function,
                package,
                file,
                &function.name,
                emitter.render_function(function),
            );
            document.signature = function.signature.clone();
            self.documents.push(document);
        }
        for ty in file.types() {
            self.add_type(package, file, ty, emitter);
        }
    }

    fn add_type(&mut self, package: &Package, file: &File, ty: &Type, emitter: &dyn Emitter) {
        let mut document = self.document(
            DocumentKind::Type,
            package,
            file,
            &ty.name,
            emitter.render_type(ty),
        );
        document.ty = ty.name.clone();

        let key = (package.import_path.clone(), ty.name.clone());
        if ty.fields().is_empty() {
            self.deferred.push((key, ty.synthetic, document));
        } else {
            self.emitted.insert(key);
            self.documents.push(document);
            for field in ty.fields() {
                let document = self.field_document(package, file, ty, field);
                self.documents.push(document);
            }
        }

        for method in ty.methods() {
            let mut document = self.document(
                DocumentKind::Method,
                package,
                file,
                &method.name,
                emitter.render_function(method),
            );
            document.ty = ty.name.clone();
            document.signature = method.signature.clone();
            self.documents.push(document);
        }
    }

    fn field_document(&self, package: &Package, file: &File, ty: &Type, field: &Field) -> Document {
        let name = field.display_name();
        let content = match field.span.text() {
            Some(text) => text.to_string(),
            None => format!("{} {}", name, field.ty.name).trim().to_string(),
        };
        let mut document = self.document(DocumentKind::Field, package, file, &name, content);
        document.ty = ty.name.clone();
        document
    }

    fn binding_document(
        &self,
        kind: DocumentKind,
        package: &Package,
        file: &File,
        binding: &Binding,
        content: String,
    ) -> Document {
        let mut document = self.document(kind, package, file, &binding.name, content);
        document.ty = binding.type_name().to_string();
        document
    }

    /// Small text assets only
    fn asset_document(&self, package: &Package, asset: &Asset) -> Option<Document> {
        if asset.is_empty() || asset.content.len() > ASSET_SIZE_LIMIT {
            debug!("Skipping asset {} ({} bytes)", asset.path, asset.content.len());
            return None;
        }
        let content = String::from_utf8(asset.content.clone()).ok()?;
        let mut document = Document::new(DocumentKind::Asset, asset.path.clone(), asset.name.clone(), content);
        document.project = self.project.name.clone();
        document.package = package.name.clone();
        Some(document)
    }

    fn document(
        &self,
        kind: DocumentKind,
        package: &Package,
        file: &File,
        name: &str,
        content: String,
    ) -> Document {
        let mut document = Document::new(kind, file.path.clone(), name, content);
        document.project = self.project.name.clone();
        document.package = package.name.clone();
        document
    }
}
