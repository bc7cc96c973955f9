//! Language front-ends
//!
//! Each front-end turns one language's tree-sitter parse tree into graph
//! entities and satisfies the same capability contract, [`Inspector`]:
//! `inspect_source`, `inspect_file`, `inspect_package`, `inspect_project`.
//!
//! # Architecture
//!
//! - `base/` - per-call extractor state and tree helpers
//! - `assembly.rs` - package and project assembly shared by all front-ends
//! - `manager.rs` - [`InspectorManager`], the closed extension registry
//! - `go/`, `rust/`, `python/` - language front-ends

pub mod assembly;
pub mod base;
pub mod go;
pub mod manager;
pub mod python;
pub mod rust;

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::config::InspectConfig;
use crate::graph::{File, Package, Project};
use crate::language::Language;
use crate::repository::ProjectInfo;
use crate::utils::paths;

pub use go::GoInspector;
pub use manager::InspectorManager;
pub use python::PythonInspector;
pub use rust::RustInspector;

/// Capability contract of a language front-end
///
/// Implementations hold no per-call state: every extraction builds its own
/// extractor, so one inspector may serve many threads at once.
pub trait Inspector: Send + Sync {
    fn language(&self) -> Language;

    fn config(&self) -> &InspectConfig;

    /// Extract one file's entities from its source bytes
    ///
    /// `path` becomes the File's path; it is empty for in-memory sources.
    fn extract(&self, path: &str, source: &[u8]) -> anyhow::Result<File>;

    /// Import path of the package living in `rel_dir` (root-relative)
    fn import_path(&self, rel_dir: &str, info: &ProjectInfo) -> String;

    /// Package name for the sources in `rel_dir`
    fn package_name(&self, files: &[File], rel_dir: &str, info: &ProjectInfo) -> String {
        files
            .iter()
            .map(|f| f.package.as_str())
            .find(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_package_name(rel_dir, info))
    }

    fn inspect_source(&self, source: &[u8]) -> anyhow::Result<File> {
        self.extract("", source)
    }

    fn inspect_file(&self, path: &Path) -> anyhow::Result<File> {
        let source = fs::read(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        self.extract(&paths::to_unix(path), &source)
            .with_context(|| format!("Failed to inspect {}", path.display()))
    }

    fn inspect_package(&self, dir: &Path) -> anyhow::Result<Package> {
        assembly::inspect_package(self, dir)
    }

    fn inspect_project(&self, root: &Path) -> anyhow::Result<Project> {
        assembly::inspect_project(self, root)
    }
}

/// Last directory segment, or the project name for the root
pub fn default_package_name(rel_dir: &str, info: &ProjectInfo) -> String {
    let base = paths::base_name(rel_dir);
    if base.is_empty() || base == "." {
        info.name.clone()
    } else {
        base.to_string()
    }
}

/// Exported by the Go convention: leading uppercase letter
pub(crate) fn is_upper_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
