//! Error taxonomy shared by extraction, structural edits and storage.
//!
//! Front-end and store entry points return `anyhow::Result` so failures carry a
//! wrapped chain with the failing path; the variants below are the typed roots
//! of those chains and the direct return type of structural edits.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input for one file
    #[error("failed to parse {path}: syntax error at line {line}")]
    Parse { path: String, line: usize },

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Structural lookup failed (package, file, type, field or method absent)
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("invalid identity reference: {0}")]
    InvalidIdentity(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        Error::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
