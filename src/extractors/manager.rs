//! InspectorManager - public entry point for extraction
//!
//! Selects the front-end for a file by its extension through a closed
//! registry and, for packages and projects, by the detected project kind or
//! the dominant source language on disk.

use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use super::{GoInspector, Inspector, PythonInspector, RustInspector};
use crate::config::InspectConfig;
use crate::error::Error;
use crate::graph::{File, Package, Project};
use crate::language::Language;
use crate::repository;
use crate::utils::ignore::SkipMatcher;

/// Manager for all language front-ends
#[derive(Debug, Clone, Default)]
pub struct InspectorManager {
    config: InspectConfig,
}

impl InspectorManager {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Front-end for `language`
    pub fn inspector(&self, language: Language) -> Box<dyn Inspector> {
        let config = self.config.clone();
        match language {
            Language::Go => Box::new(GoInspector::new(config)),
            Language::Rust => Box::new(RustInspector::new(config)),
            Language::Python => Box::new(PythonInspector::new(config)),
        }
    }

    /// Front-end for a file, chosen by its extension
    pub fn for_path(&self, path: impl AsRef<Path>) -> crate::error::Result<Box<dyn Inspector>> {
        let path = path.as_ref();
        Language::from_path(path)
            .map(|language| self.inspector(language))
            .ok_or_else(|| Error::UnsupportedFileType(path.display().to_string()))
    }

    pub fn inspect_file(&self, path: &Path) -> anyhow::Result<File> {
        self.for_path(path)?.inspect_file(path)
    }

    /// Extract in-memory source; `path` selects the language and names the File
    pub fn inspect_source(&self, path: &str, source: &[u8]) -> anyhow::Result<File> {
        self.for_path(path)?.extract(path, source)
    }

    pub fn inspect_package(&self, dir: &Path) -> anyhow::Result<Package> {
        let language = dominant_language(dir, 1, &self.config.skip_matcher())
            .with_context(|| format!("No supported sources in {}", dir.display()))?;
        self.inspector(language).inspect_package(dir)
    }

    /// Extract a whole project with the front-end of its detected language
    pub fn inspect_project(&self, root: &Path) -> anyhow::Result<Project> {
        let language = self
            .detect_language(root)
            .with_context(|| format!("No supported sources in {}", root.display()))?;
        self.inspector(language).inspect_project(root)
    }

    /// Language of the project at `root`: the marker file's ecosystem when it
    /// has a front-end, else the most common source extension
    pub fn detect_language(&self, root: &Path) -> Option<Language> {
        let info = repository::detect(root);
        if let Some(language) = Language::from_project_kind(&info.kind) {
            return Some(language);
        }
        dominant_language(root, usize::MAX, &self.config.skip_matcher())
    }
}

/// Most frequent supported extension below `dir`, ties broken by [`Language::ALL`] order
fn dominant_language(dir: &Path, max_depth: usize, matcher: &SkipMatcher) -> Option<Language> {
    let mut census: HashMap<Language, usize> = HashMap::new();
    let walker = WalkDir::new(dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0 || !(SkipMatcher::is_hidden(&name) || matcher.is_skipped(&name))
        })
        .filter_map(Result::ok);

    for entry in walker {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(language) = Language::from_path(entry.path()) {
            *census.entry(language).or_default() += 1;
        }
    }
    debug!("Source census for {}: {:?}", dir.display(), census);

    let mut best: Option<(Language, usize)> = None;
    for language in Language::ALL {
        let count = census.get(&language).copied().unwrap_or(0);
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((language, count));
        }
    }
    best.map(|(language, _)| language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_unknown_extension_is_reported() {
        let manager = InspectorManager::default();
        let err = manager.inspect_source("notes.txt", b"hello").unwrap_err();
        let err = err.downcast_ref::<Error>().expect("typed error");
        assert!(matches!(err, Error::UnsupportedFileType(path) if path == "notes.txt"));
    }

    #[test]
    fn test_source_dispatch_by_extension() {
        let manager = InspectorManager::default();
        let go = manager
            .inspect_source("pkg/a.go", b"package pkg\n\ntype A struct{}\n")
            .unwrap();
        assert_eq!(go.language(), Some(Language::Go));
        assert!(go.lookup_type("A").is_some());

        let rust = manager.inspect_source("src/a.rs", b"pub struct A;\n").unwrap();
        assert!(rust.lookup_type("A").is_some());

        let python = manager.inspect_source("app/a.py", b"class A:\n    pass\n").unwrap();
        assert!(python.lookup_type("A").is_some());
    }

    #[test]
    fn test_project_language_from_marker_or_census() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Cargo.toml", "[package]\nname = \"demo\"\n");
        write(dir.path(), "tools/gen.py", "X = 1\n");
        write(dir.path(), "tools/other.py", "Y = 2\n");
        let manager = InspectorManager::default();
        assert_eq!(manager.detect_language(dir.path()), Some(Language::Rust));

        let bare = TempDir::new().unwrap();
        write(bare.path(), "a.py", "X = 1\n");
        write(bare.path(), "b.py", "Y = 2\n");
        write(bare.path(), "main.go", "package main\n");
        assert_eq!(manager.detect_language(bare.path()), Some(Language::Python));

        let empty = TempDir::new().unwrap();
        write(empty.path(), "README.md", "# nothing\n");
        assert_eq!(manager.detect_language(empty.path()), None);
    }

    #[test]
    fn test_inspect_project_skips_broken_packages() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/shop\n\ngo 1.22\n");
        write(dir.path(), "main.go", "package main\n\nfunc main() {}\n");
        write(
            dir.path(),
            "models/user.go",
            "package models\n\ntype User struct {\n\tName string\n}\n",
        );
        write(dir.path(), "broken/bad.go", "package broken\n\nfunc {\n");
        write(dir.path(), "models/schema.sql", "create table users();\n");

        let project = InspectorManager::default()
            .inspect_project(dir.path())
            .unwrap();
        assert_eq!(project.name, "shop");
        assert_eq!(project.kind, "go");
        assert_eq!(project.language, Some(Language::Go));
        assert_eq!(project.packages().len(), 2);
        assert!(project.package("broken").is_none());

        let models = project.package("models").unwrap();
        assert_eq!(models.import_path, "example.com/shop/models");
        assert_eq!(models.files()[0].path, "models/user.go");
        let (package, user) = project.lookup_type("User").unwrap();
        assert_eq!(package.name, "models");
        assert_eq!(user.pkg_path, "example.com/shop/models");
        assert_eq!(models.assets().len(), 1);
        assert_eq!(models.assets()[0].path, "models/schema.sql");
    }
}
