//! Language Support - closed registry of supported input languages
//!
//! ALL extension mapping and tree-sitter grammar selection lives here so the
//! inspector manager, the emitter registry and the package scanner agree on
//! which files belong to which front-end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Rust,
    Python,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Go, Language::Rust, Language::Python];

    pub fn name(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Python => "python",
        }
    }

    /// Primary file extension, used when synthesizing file names
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rs",
            Language::Python => "py",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Language> {
        match extension {
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "py" | "pyi" => Some(Language::Python),
            _ => None,
        }
    }

    /// Detect language from a path's extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Language> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
    }

    /// Project-type tag reported by repository detection
    pub fn from_project_kind(kind: &str) -> Option<Language> {
        match kind {
            "go" => Some(Language::Go),
            "rust" => Some(Language::Rust),
            "python" => Some(Language::Python),
            _ => None,
        }
    }

    /// Get the tree-sitter grammar for this language
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }

    pub fn is_source_file(self, path: &Path) -> bool {
        Language::from_path(path) == Some(self)
    }

    /// Test sources by naming convention
    pub fn is_test_file(self, file_name: &str) -> bool {
        match self {
            Language::Go => file_name.ends_with("_test.go"),
            Language::Rust => false,
            Language::Python => {
                file_name.starts_with("test_") || file_name.ends_with("_test.py")
            }
        }
    }

    pub fn line_comment(self) -> &'static str {
        match self {
            Language::Go | Language::Rust => "//",
            Language::Python => "#",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
