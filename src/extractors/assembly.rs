//! Package and project assembly shared by every front-end
//!
//! Per-file results are concatenated into packages, file paths are rewritten
//! project-root-relative, and types missing their package are backfilled.
//! Non-source files below a package directory become assets; a descendant
//! directory holding sources of the same language is a package of its own
//! and is never walked for its parent's assets.

use anyhow::{bail, Context};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::Inspector;
use crate::graph::{Asset, File, Package, Project};
use crate::repository::{self, ProjectInfo};
use crate::utils::ignore::SkipMatcher;
use crate::utils::paths;

pub fn inspect_package<I: Inspector + ?Sized>(inspector: &I, dir: &Path) -> anyhow::Result<Package> {
    let info = repository::detect(dir);
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve package directory: {}", dir.display()))?;

    match collect_package(inspector, &info, &dir)? {
        Some(package) => Ok(package),
        None => bail!(
            "no {} sources in {}",
            inspector.language(),
            dir.display()
        ),
    }
}

pub fn inspect_project<I: Inspector + ?Sized>(inspector: &I, root: &Path) -> anyhow::Result<Project> {
    let info = repository::detect(root);
    let scan_root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root: {}", root.display()))?;
    let matcher = inspector.config().skip_matcher();

    let mut project = Project::new(info.name.clone(), info.root.clone());
    project.kind = info.kind.clone();
    project.repository_url = info.repository_url.clone();
    project.language = Some(inspector.language());

    let walker = WalkDir::new(&scan_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_excluded(entry.path(), &info.root, &matcher)
        });

    let mut skipped = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        match collect_package(inspector, &info, entry.path()) {
            Ok(Some(package)) => {
                project.add_package(package);
            }
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                warn!("Skipping package {}: {:#}", entry.path().display(), e);
            }
        }
    }

    info!(
        "Inspected {} project '{}': {} packages, {} skipped",
        inspector.language(),
        project.name,
        project.packages().len(),
        skipped
    );
    Ok(project)
}

/// Extract the package in `dir`; `None` when it holds no sources
pub fn collect_package<I: Inspector + ?Sized>(
    inspector: &I,
    info: &ProjectInfo,
    dir: &Path,
) -> anyhow::Result<Option<Package>> {
    let config = inspector.config();
    let language = inspector.language();
    let matcher = config.skip_matcher();
    let rel_dir = relative_dir(dir, &info.root);

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read package directory: {}", dir.display()))?;

    let mut sources: Vec<PathBuf> = Vec::new();
    let mut asset_files: Vec<PathBuf> = Vec::new();
    let mut asset_dirs: Vec<PathBuf> = Vec::new();

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let rel = paths::join_unix(&rel_dir, &name);
        if SkipMatcher::is_hidden(&name) || matcher.is_skipped(&rel) {
            continue;
        }

        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if file_type.is_dir() {
            asset_dirs.push(path);
        } else if language.is_source_file(&path) {
            if language.is_test_file(&name) && !config.include_tests {
                continue;
            }
            sources.push(path);
        } else if file_type.is_file() {
            asset_files.push(path);
        }
    }

    if sources.is_empty() {
        return Ok(None);
    }
    sources.sort();

    let extract_one = |path: &PathBuf| -> anyhow::Result<File> {
        let rel = paths::relative_unix_path(path, &info.root);
        let source =
            fs::read(path).with_context(|| format!("Failed to read source file: {}", path.display()))?;
        inspector
            .extract(&rel, &source)
            .with_context(|| format!("Failed to inspect {}", rel))
    };

    let files: Vec<File> = if config.parallel {
        sources.par_iter().map(extract_one).collect::<anyhow::Result<_>>()?
    } else {
        sources.iter().map(extract_one).collect::<anyhow::Result<_>>()?
    };

    let name = inspector.package_name(&files, &rel_dir, info);
    let import_path = inspector.import_path(&rel_dir, info);
    let mut package = Package::new(name.clone(), import_path.clone()).with_path(rel_dir.clone());

    for mut file in files {
        if file.package.is_empty() {
            file.package = name.clone();
        }
        file.import_path = import_path.clone();
        file.update_types(|ty| {
            if ty.package.is_empty() {
                ty.package = name.clone();
            }
            if ty.pkg_path.is_empty() {
                ty.pkg_path = import_path.clone();
            }
        });
        package.add_file(file);
    }

    if config.collect_assets {
        asset_files.sort();
        asset_dirs.sort();
        for path in &asset_files {
            read_asset(&mut package, path, &info.root)?;
        }
        for asset_dir in &asset_dirs {
            collect_asset_dir(inspector, &mut package, asset_dir, &info.root, &matcher)?;
        }
    }

    debug!(
        "Collected package {} ({}): {} files, {} types, {} assets",
        package.name,
        package.import_path,
        package.files().len(),
        package.types().count(),
        package.assets().len()
    );
    Ok(Some(package))
}

fn collect_asset_dir<I: Inspector + ?Sized>(
    inspector: &I,
    package: &mut Package,
    dir: &Path,
    root: &Path,
    matcher: &SkipMatcher,
) -> anyhow::Result<()> {
    let language = inspector.language();
    if has_sources(dir, |p| language.is_source_file(p)) {
        return Ok(());
    }

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if is_excluded(entry.path(), root, matcher) {
                return false;
            }
            !(entry.file_type().is_dir()
                && has_sources(entry.path(), |p| language.is_source_file(p)))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable asset entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            read_asset(package, entry.path(), root)?;
        }
    }
    Ok(())
}

fn read_asset(package: &mut Package, path: &Path, root: &Path) -> anyhow::Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read asset: {}", path.display()))?;
    package.add_asset(Asset::new(paths::relative_unix_path(path, root), content));
    Ok(())
}

fn has_sources(dir: &Path, is_source: impl Fn(&Path) -> bool) -> bool {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .any(|e| e.file_type().is_ok_and(|t| t.is_file()) && is_source(&e.path())),
        Err(_) => false,
    }
}

fn is_excluded(path: &Path, root: &Path, matcher: &SkipMatcher) -> bool {
    let hidden = path
        .file_name()
        .map(|n| SkipMatcher::is_hidden(&n.to_string_lossy()))
        .unwrap_or(false);
    hidden || matcher.is_skipped(&paths::relative_unix_path(path, root))
}

fn relative_dir(dir: &Path, root: &Path) -> String {
    let rel = paths::relative_unix_path(dir, root);
    if rel == "." {
        String::new()
    } else {
        rel
    }
}
