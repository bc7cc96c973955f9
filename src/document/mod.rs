//! Document pipeline
//!
//! Projects a [`Project`](crate::graph::Project) onto flat, size-bounded
//! [`Document`]s for an external embedding/indexing system:
//!
//! - `builder.rs` - one document per constant, variable, function, type,
//!   field, method and small text asset
//! - `chunk.rs` - byte-bounded splitting of oversized documents
//! - `group.rs` - the inverse view: one pseudo-document per source file
//! - `hash.rs` - fixed-key 64-bit content hashes
//!
//! Documents serialize with stable field names; [`to_json_lines`] and
//! [`from_json_lines`] are the export format.

pub mod builder;
pub mod chunk;
pub mod group;
pub mod hash;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use builder::build_documents;
pub use chunk::{split, split_all};
pub use group::group_by_file;
pub use hash::content_hash;

/// Nominal chunk size in bytes
pub const CHUNK_SIZE: usize = 8192;
/// Bytes of each chunk kept free for downstream framing
pub const CHUNK_RESERVE: usize = 256;
/// Largest content a single chunk carries
pub const CHUNK_LIMIT: usize = CHUNK_SIZE - CHUNK_RESERVE;
/// Assets larger than this are not projected
pub const ASSET_SIZE_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Constant,
    Variable,
    Function,
    Type,
    Field,
    Method,
    Asset,
    /// Per-file pseudo-document produced by grouping
    File,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Constant => "constant",
            DocumentKind::Variable => "variable",
            DocumentKind::Function => "function",
            DocumentKind::Type => "type",
            DocumentKind::Field => "field",
            DocumentKind::Method => "method",
            DocumentKind::Asset => "asset",
            DocumentKind::File => "file",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of one graph entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub project: String,
    pub path: String,
    pub package: String,
    pub name: String,
    /// Value type for bindings, owning type for fields and methods
    #[serde(rename = "type")]
    pub ty: String,
    pub hash: u64,
    pub signature: String,
    pub content: String,
    /// Chunk number from 1; 0 when the content was not split
    pub part: usize,
}

impl Document {
    pub fn new(kind: DocumentKind, path: impl Into<String>, name: impl Into<String>, content: String) -> Self {
        Self {
            kind,
            project: String::new(),
            path: path.into(),
            package: String::new(),
            name: name.into(),
            ty: String::new(),
            hash: content_hash(&content),
            signature: String::new(),
            content,
            part: 0,
        }
    }

    /// `kind:path:key:` where key is the signature when known, else the name
    pub fn id(&self) -> String {
        let key = if self.signature.is_empty() {
            &self.name
        } else {
            &self.signature
        };
        format!("{}:{}:{}:", self.kind, self.path, key)
    }

    pub fn is_chunk(&self) -> bool {
        self.part > 0
    }

    /// Replace the content and re-hash it
    pub fn set_content(&mut self, content: String) {
        self.hash = content_hash(&content);
        self.content = content;
    }
}

/// One JSON object per line
pub fn to_json_lines(documents: &[Document]) -> anyhow::Result<String> {
    let mut out = String::new();
    for document in documents {
        let line = serde_json::to_string(document)
            .with_context(|| format!("Failed to serialize document {}", document.id()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

pub fn from_json_lines(text: &str) -> anyhow::Result<Vec<Document>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid document on line {}", index + 1))
        })
        .collect()
}
