// Codegraph Core - tree-sitter powered source graph extraction
//
// Front-ends for Go, Rust and Python turn parse trees into one
// language-agnostic graph (packages, files, types, fields, methods,
// functions, constants, variables). The graph can be edited and written back
// through per-language emitters, or projected into size-bounded documents
// for an embedding pipeline.

pub mod coder;
pub mod config;
pub mod document;
pub mod emitter;
pub mod error;
pub mod extractors;
pub mod graph;
pub mod language;
pub mod repository;

// Path and skip-pattern helpers
pub mod utils;

pub use coder::{Coder, StoreSummary};
pub use config::InspectConfig;
pub use document::{build_documents, group_by_file, Document, DocumentKind};
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use extractors::{Inspector, InspectorManager};
pub use graph::{File, Package, Project};
pub use language::Language;
