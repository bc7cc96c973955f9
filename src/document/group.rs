//! Per-file regrouping
//!
//! The approximate inverse of building and chunking: chunked parts are
//! re-joined, field documents are dropped (their text is part of the owning
//! type), and everything else sharing a path is concatenated into one
//! `file` document. Sections follow a fixed order: constants, variables,
//! types, functions, then methods grouped by receiver. Assets pass through
//! unchanged. The result is a textual approximation; byte-exact output
//! comes from the emitters.

use std::collections::HashMap;

use super::{Document, DocumentKind};
use crate::utils::paths;

pub fn group_by_file(documents: &[Document]) -> Vec<Document> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();

    for document in rejoin_parts(documents) {
        if document.kind == DocumentKind::Asset {
            slots.push(Slot::Asset(document));
            continue;
        }
        if document.kind == DocumentKind::Field {
            continue;
        }
        match by_path.get(&document.path) {
            Some(&index) => {
                if let Slot::File(group) = &mut slots[index] {
                    group.push(document);
                }
            }
            None => {
                by_path.insert(document.path.clone(), slots.len());
                slots.push(Slot::File(vec![document]));
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Asset(document) => document,
            Slot::File(group) => file_document(group),
        })
        .collect()
}

enum Slot {
    Asset(Document),
    File(Vec<Document>),
}

/// Concatenate the parts of every chunked document in part order; the
/// re-joined document takes the first part's position
fn rejoin_parts(documents: &[Document]) -> Vec<Document> {
    let mut out: Vec<Document> = Vec::new();
    let mut parts: HashMap<String, Vec<&Document>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for document in documents {
        if document.kind == DocumentKind::Asset || !document.is_chunk() {
            out.push(document.clone());
            order.push(String::new());
            continue;
        }
        let id = document.id();
        let entry = parts.entry(id.clone()).or_default();
        if entry.is_empty() {
            out.push(document.clone());
            order.push(id);
        }
        entry.push(document);
    }

    for (document, id) in out.iter_mut().zip(order) {
        let Some(mut chunks) = parts.remove(&id) else {
            continue;
        };
        chunks.sort_by_key(|c| c.part);
        let content: String = chunks.iter().map(|c| c.content.as_str()).collect();
        document.part = 0;
        document.set_content(content);
    }
    out
}

fn file_document(group: Vec<Document>) -> Document {
    let mut sections: Vec<&str> = Vec::new();
    for kind in [
        DocumentKind::Constant,
        DocumentKind::Variable,
        DocumentKind::Type,
        DocumentKind::Function,
    ] {
        sections.extend(
            group
                .iter()
                .filter(|d| d.kind == kind)
                .map(|d| d.content.as_str()),
        );
    }

    let mut receivers: Vec<&str> = Vec::new();
    for document in group.iter().filter(|d| d.kind == DocumentKind::Method) {
        if !receivers.contains(&document.ty.as_str()) {
            receivers.push(&document.ty);
        }
    }
    for receiver in receivers {
        sections.extend(
            group
                .iter()
                .filter(|d| d.kind == DocumentKind::Method && d.ty == receiver)
                .map(|d| d.content.as_str()),
        );
    }

    let content = sections
        .into_iter()
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let first = &group[0];
    let mut document = Document::new(
        DocumentKind::File,
        first.path.clone(),
        paths::base_name(&first.path),
        content,
    );
    document.project = first.project.clone();
    document.package = first.package.clone();
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::chunk::split_with_limit;

    fn doc(kind: DocumentKind, path: &str, name: &str, ty: &str, content: &str) -> Document {
        let mut document = Document::new(kind, path, name, content.to_string());
        document.ty = ty.to_string();
        document.project = "shop".to_string();
        document.package = "models".to_string();
        document
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let documents = vec![
            doc(DocumentKind::Method, "m/user.go", "Greet", "User", "func (u User) Greet() {}"),
            doc(DocumentKind::Function, "m/user.go", "New", "", "func New() {}"),
            doc(DocumentKind::Type, "m/user.go", "User", "User", "type User struct {\n\tName string\n}"),
            doc(DocumentKind::Field, "m/user.go", "Name", "User", "Name string"),
            doc(DocumentKind::Method, "m/user.go", "Save", "Store", "func (s Store) Save() {}"),
            doc(DocumentKind::Method, "m/user.go", "Name", "User", "func (u User) Name() {}"),
            doc(DocumentKind::Variable, "m/user.go", "debug", "", "var debug = false"),
            doc(DocumentKind::Constant, "m/user.go", "Max", "int", "const Max = 3"),
        ];
        let grouped = group_by_file(&documents);
        assert_eq!(grouped.len(), 1);

        let file = &grouped[0];
        assert_eq!(file.kind, DocumentKind::File);
        assert_eq!(file.name, "user.go");
        assert_eq!(file.package, "models");
        assert_eq!(
            file.content,
            "const Max = 3\n\n\
             var debug = false\n\n\
             type User struct {\n\tName string\n}\n\n\
             func New() {}\n\n\
             func (u User) Greet() {}\n\n\
             func (u User) Name() {}\n\n\
             func (s Store) Save() {}"
        );
        assert_eq!(file.hash, crate::document::content_hash(&file.content));
    }

    #[test]
    fn test_chunks_rejoined_and_assets_untouched() {
        let body = "x".repeat(50);
        let big = doc(DocumentKind::Function, "a.go", "Big", "", &body);
        let mut documents = split_with_limit(big, 16);
        assert_eq!(documents.len(), 4);
        documents.swap(0, 2);
        documents.push(doc(DocumentKind::Asset, "schema.sql", "schema.sql", "", "create table t();"));
        documents.push(doc(DocumentKind::Constant, "b.go", "B", "", "const B = 1"));

        let grouped = group_by_file(&documents);
        let summary: Vec<(DocumentKind, &str)> =
            grouped.iter().map(|d| (d.kind, d.path.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (DocumentKind::File, "a.go"),
                (DocumentKind::Asset, "schema.sql"),
                (DocumentKind::File, "b.go"),
            ]
        );
        assert_eq!(grouped[0].content, body);
        assert_eq!(grouped[0].part, 0);
        assert_eq!(grouped[1], documents[4]);
    }
}
