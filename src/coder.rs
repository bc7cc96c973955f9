//! Structural editor
//!
//! [`Coder`] mutates a loaded [`Project`] in place and writes it back out
//! through the emitters. Every edit names its parents explicitly and is
//! declined with [`Error::NotFound`] / [`Error::AlreadyExists`] instead of
//! panicking; all slice mutation goes through the graph's indexed
//! collections, so lookups stay consistent after any edit.
//!
//! Packages are addressed as [`Project::package`] resolves them: by
//! root-relative directory, then import path, then name.
//!
//! Edits are not synchronized: callers serialize edits to one project.

use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::InspectConfig;
use crate::emitter;
use crate::error::{Error, Result};
use crate::extractors::InspectorManager;
use crate::graph::{
    Asset, Binding, Field, File, Function, ItemMut, Package, Project, Type,
};
use crate::utils::paths;

/// Counts reported by [`Coder::store_project`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub files: usize,
    pub assets: usize,
    /// Files without an emitter for their extension
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Coder {
    manager: InspectorManager,
}

impl Coder {
    pub fn new(config: InspectConfig) -> Self {
        Self {
            manager: InspectorManager::new(config),
        }
    }

    pub fn manager(&self) -> &InspectorManager {
        &self.manager
    }

    // --- load ---

    pub fn load_file(&self, path: &Path) -> anyhow::Result<File> {
        self.manager.inspect_file(path)
    }

    pub fn load_package(&self, dir: &Path) -> anyhow::Result<Package> {
        self.manager.inspect_package(dir)
    }

    /// Detect the project around `root` and extract it with its language's
    /// front-end
    pub fn load_project(&self, root: &Path) -> anyhow::Result<Project> {
        let project = self.manager.inspect_project(root)?;
        info!(
            "Loaded project '{}' ({}) from {}: {} packages",
            project.name,
            project.kind,
            root.display(),
            project.packages().len()
        );
        Ok(project)
    }

    // --- store ---

    /// Write `file` below `dest`; `false` when no emitter handles its
    /// extension
    pub fn store_file(&self, file: &File, dest: &Path) -> anyhow::Result<bool> {
        let Some(emitter) = emitter::for_extension(file.extension()) else {
            debug!("No emitter for {}, skipping", file.path);
            return Ok(false);
        };
        let content = emitter
            .emit(file)
            .with_context(|| format!("Failed to emit {}", file.path))?;
        write_bytes(&paths::to_absolute_native(&file.path, dest), &content)?;
        Ok(true)
    }

    /// Mirror the project's files and assets below `dest`
    ///
    /// Stops at the first I/O failure. Empty assets are not written.
    pub fn store_project(&self, project: &Project, dest: &Path) -> anyhow::Result<StoreSummary> {
        let mut summary = StoreSummary::default();
        for package in project.packages() {
            for file in package.files() {
                if self.store_file(file, dest)? {
                    summary.files += 1;
                } else {
                    summary.skipped += 1;
                }
            }
            for asset in package.assets() {
                if asset.is_empty() {
                    debug!("Skipping empty asset {}", asset.path);
                    continue;
                }
                write_bytes(&paths::to_absolute_native(&asset.path, dest), &asset.content)?;
                summary.assets += 1;
            }
        }
        info!(
            "Stored project '{}' to {}: {} files, {} assets, {} skipped",
            project.name,
            dest.display(),
            summary.files,
            summary.assets,
            summary.skipped
        );
        Ok(summary)
    }

    // --- packages & files ---

    pub fn create_package(
        &self,
        project: &mut Project,
        name: &str,
        import_path: &str,
        path: &str,
    ) -> Result<()> {
        let package = Package::new(name, import_path).with_path(path);
        let taken = project.packages().iter().any(|p| {
            p.key() == package.key()
                || (!import_path.is_empty() && p.import_path == import_path)
        });
        if taken {
            return Err(Error::already_exists("package", package.key()));
        }
        project.add_package(package);
        Ok(())
    }

    pub fn remove_package(&self, project: &mut Project, package: &str) -> Result<Package> {
        project
            .remove_package(package)
            .ok_or_else(|| Error::not_found("package", package))
    }

    /// Add an empty file named `file_name` to the package directory
    pub fn create_file(&self, project: &mut Project, package: &str, file_name: &str) -> Result<()> {
        let mut pkg = package_mut(project, package)?;
        if pkg.file(file_name).is_some() {
            return Err(Error::already_exists("file", file_name));
        }
        let mut file = File::new(paths::join_unix(&pkg.path, file_name));
        file.package = pkg.name.clone();
        file.import_path = pkg.import_path.clone();
        pkg.add_file(file);
        Ok(())
    }

    pub fn remove_file(&self, project: &mut Project, package: &str, file_name: &str) -> Result<File> {
        package_mut(project, package)?
            .remove_file(file_name)
            .ok_or_else(|| Error::not_found("file", file_name))
    }

    pub fn add_asset(&self, project: &mut Project, package: &str, asset: Asset) -> Result<()> {
        package_mut(project, package)?.add_asset(asset);
        Ok(())
    }

    // --- types ---

    pub fn create_type(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        mut ty: Type,
    ) -> Result<()> {
        let mut pkg = package_mut(project, package)?;
        if pkg.lookup_type(&ty.name).is_some_and(|t| !t.synthetic) {
            return Err(Error::already_exists("type", ty.name));
        }
        if ty.package.is_empty() {
            ty.package = pkg.name.clone();
        }
        if ty.pkg_path.is_empty() {
            ty.pkg_path = pkg.import_path.clone();
        }
        let name = ty.name.clone();
        let target = {
            let mut file = file_mut(&mut pkg, file_name)?;
            if file.lookup_type(&name).is_some_and(|t| !t.synthetic) {
                return Err(Error::already_exists("type", name));
            }
            // a receiver placeholder in the same file hands over its methods
            if let Some(placeholder) = file.remove_type(&name) {
                adopt_placeholder(&mut ty, placeholder);
            }
            file.add_type(ty);
            file.name.clone()
        };
        retire_placeholders(&mut pkg, &name, &target);
        Ok(())
    }

    pub fn remove_type(&self, project: &mut Project, package: &str, type_name: &str) -> Result<Type> {
        let mut pkg = package_mut(project, package)?;
        let file_name = pkg
            .type_file(type_name)
            .map(|f| f.name.clone())
            .ok_or_else(|| Error::not_found("type", type_name))?;
        let mut file = file_mut(&mut pkg, &file_name)?;
        file.remove_type(type_name)
            .ok_or_else(|| Error::not_found("type", type_name))
    }

    pub fn create_field(
        &self,
        project: &mut Project,
        package: &str,
        type_name: &str,
        field: Field,
    ) -> Result<()> {
        edit_type(project, package, type_name, |ty| {
            if !field.name.is_empty() && ty.get_field(&field.name).is_some() {
                return Err(Error::already_exists("field", field.name));
            }
            ty.add_field(field);
            Ok(())
        })
    }

    pub fn remove_field(
        &self,
        project: &mut Project,
        package: &str,
        type_name: &str,
        field_name: &str,
    ) -> Result<Field> {
        edit_type(project, package, type_name, |ty| {
            ty.remove_field(field_name)
                .ok_or_else(|| Error::not_found("field", field_name))
        })
    }

    /// Attach `method` to the type; its receiver is set to the type name
    pub fn create_method(
        &self,
        project: &mut Project,
        package: &str,
        type_name: &str,
        mut method: Function,
    ) -> Result<()> {
        edit_type(project, package, type_name, |ty| {
            if ty.get_method(&method.name).is_some() {
                return Err(Error::already_exists("method", method.name));
            }
            method.receiver = Some(ty.name.clone());
            ty.add_method(method);
            Ok(())
        })
    }

    pub fn remove_method(
        &self,
        project: &mut Project,
        package: &str,
        type_name: &str,
        method_name: &str,
    ) -> Result<Function> {
        edit_type(project, package, type_name, |ty| {
            ty.remove_method(method_name)
                .ok_or_else(|| Error::not_found("method", method_name))
        })
    }

    // --- functions & bindings ---

    pub fn create_function(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        function: Function,
    ) -> Result<()> {
        let mut pkg = package_mut(project, package)?;
        if pkg.files().iter().any(|f| f.lookup_function(&function.name).is_some()) {
            return Err(Error::already_exists("function", function.name));
        }
        file_mut(&mut pkg, file_name)?.add_function(function);
        Ok(())
    }

    /// Remove a free function from whichever file of the package declares it
    pub fn remove_function(&self, project: &mut Project, package: &str, name: &str) -> Result<Function> {
        let mut pkg = package_mut(project, package)?;
        let file_name = pkg
            .files()
            .iter()
            .find(|f| f.lookup_function(name).is_some())
            .map(|f| f.name.clone())
            .ok_or_else(|| Error::not_found("function", name))?;
        let mut file = file_mut(&mut pkg, &file_name)?;
        file.remove_function(name)
            .ok_or_else(|| Error::not_found("function", name))
    }

    pub fn create_constant(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        constant: Binding,
    ) -> Result<()> {
        let mut pkg = package_mut(project, package)?;
        let mut file = file_mut(&mut pkg, file_name)?;
        if file.lookup_constant(&constant.name).is_some() {
            return Err(Error::already_exists("constant", constant.name));
        }
        file.add_constant(constant);
        Ok(())
    }

    pub fn remove_constant(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        name: &str,
    ) -> Result<Binding> {
        let mut pkg = package_mut(project, package)?;
        let mut file = file_mut(&mut pkg, file_name)?;
        file.remove_constant(name)
            .ok_or_else(|| Error::not_found("constant", name))
    }

    pub fn create_variable(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        variable: Binding,
    ) -> Result<()> {
        let mut pkg = package_mut(project, package)?;
        let mut file = file_mut(&mut pkg, file_name)?;
        if file.lookup_variable(&variable.name).is_some() {
            return Err(Error::already_exists("variable", variable.name));
        }
        file.add_variable(variable);
        Ok(())
    }

    pub fn remove_variable(
        &self,
        project: &mut Project,
        package: &str,
        file_name: &str,
        name: &str,
    ) -> Result<Binding> {
        let mut pkg = package_mut(project, package)?;
        let mut file = file_mut(&mut pkg, file_name)?;
        file.remove_variable(name)
            .ok_or_else(|| Error::not_found("variable", name))
    }
}

fn package_mut<'p>(project: &'p mut Project, key: &str) -> Result<ItemMut<'p, Package>> {
    project
        .package_mut(key)
        .ok_or_else(|| Error::not_found("package", key))
}

fn adopt_placeholder(ty: &mut Type, placeholder: Type) {
    for method in placeholder.methods() {
        if ty.get_method(&method.name).is_none() {
            ty.add_method(method.clone());
        }
    }
    for block in placeholder.impl_blocks {
        ty.add_impl_block(block);
    }
    for name in placeholder.implements {
        ty.add_implements(name);
    }
}

/// Drop method-less placeholders named `type_name` outside `declared_in`;
/// placeholders still carrying methods keep them in their own file
fn retire_placeholders(package: &mut Package, type_name: &str, declared_in: &str) {
    let stale: Vec<String> = package
        .files()
        .iter()
        .filter(|f| f.name != declared_in)
        .filter(|f| {
            f.lookup_type(type_name).is_some_and(|t| {
                t.synthetic && t.methods().is_empty() && t.impl_blocks.is_empty()
            })
        })
        .map(|f| f.name.clone())
        .collect();
    for file_name in stale {
        if let Some(mut file) = package.file_mut(&file_name) {
            file.remove_type(type_name);
            debug!("Retired placeholder {} in {}", type_name, file.path);
        }
    }
}

fn file_mut<'p>(package: &'p mut Package, name: &str) -> Result<ItemMut<'p, File>> {
    package
        .file_mut(name)
        .ok_or_else(|| Error::not_found("file", name))
}

/// Run `edit` on the declared type (or its synthetic placeholder) and drop
/// the type's captured text once the edit succeeded
fn edit_type<R>(
    project: &mut Project,
    package: &str,
    type_name: &str,
    edit: impl FnOnce(&mut Type) -> Result<R>,
) -> Result<R> {
    let mut pkg = package_mut(project, package)?;
    let file_name = pkg
        .type_file(type_name)
        .map(|f| f.name.clone())
        .ok_or_else(|| Error::not_found("type", type_name))?;
    let mut file = file_mut(&mut pkg, &file_name)?;
    let mut ty = file
        .type_mut(type_name)
        .ok_or_else(|| Error::not_found("type", type_name))?;
    let result = edit(&mut ty)?;
    ty.clear_captured();
    Ok(result)
}

fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{TypeKind, TypeRef};
    use crate::language::Language;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn shop() -> (TempDir, Project) {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/shop\n");
        write(
            dir.path(),
            "models/user.go",
            "package models\n\n// User is a customer.\ntype User struct {\n\tName string\n}\n",
        );
        write(dir.path(), "models/schema.sql", "create table users();\n");
        write(dir.path(), "models/empty.txt", "");
        let project = Coder::default().load_project(dir.path()).unwrap();
        (dir, project)
    }

    #[test]
    fn test_edit_and_store_round_trip() {
        let (_src, mut project) = shop();
        let coder = Coder::default();
        assert_eq!(project.language, Some(Language::Go));

        let mut email = Field::new("Email", TypeRef::named("string"));
        email.exported = true;
        coder.create_field(&mut project, "models", "User", email).unwrap();

        let out = TempDir::new().unwrap();
        let dest = out.path().join("nested/out");
        let summary = coder.store_project(&project, &dest).unwrap();
        assert_eq!(summary, StoreSummary { files: 1, assets: 1, skipped: 0 });

        let written = fs::read_to_string(dest.join("models/user.go")).unwrap();
        assert_eq!(
            written,
            "package models\n\n// User is a customer.\ntype User struct {\n\tName string\n\tEmail string\n}\n"
        );
        assert!(dest.join("models/schema.sql").exists());
        assert!(!dest.join("models/empty.txt").exists());

        let reloaded = coder.load_file(&dest.join("models/user.go")).unwrap();
        let user = reloaded.lookup_type("User").unwrap();
        assert_eq!(user.fields().len(), 2);
        assert!(user.get_field("Email").is_some());
    }

    #[test]
    fn test_structural_edits_keep_indices() {
        let (_src, mut project) = shop();
        let coder = Coder::default();

        coder.create_file(&mut project, "models", "order.go").unwrap();
        coder
            .create_type(&mut project, "models", "order.go", Type::new("Order", TypeKind::Struct))
            .unwrap();
        coder
            .create_method(&mut project, "models", "Order", Function::new("Total"))
            .unwrap();
        coder
            .create_function(&mut project, "models", "order.go", Function::new("NewOrder"))
            .unwrap();
        coder
            .create_constant(&mut project, "models", "order.go", Binding::new("MaxItems").with_value("10"))
            .unwrap();

        let models = project.package("models").unwrap();
        let order_file = models.file("order.go").unwrap();
        assert_eq!(order_file.path, "models/order.go");
        assert_eq!(order_file.lookup_constant("MaxItems").unwrap().file, "models/order.go");
        let order = models.lookup_type("Order").unwrap();
        assert_eq!(order.pkg_path, "example.com/shop/models");
        assert_eq!(order.get_method("Total").unwrap().receiver.as_deref(), Some("Order"));

        coder.remove_type(&mut project, "models", "User").unwrap();
        let models = project.package("models").unwrap();
        assert!(models.lookup_type("User").is_none());
        assert!(models.lookup_type("Order").is_some());

        coder.remove_function(&mut project, "models", "NewOrder").unwrap();
        coder.remove_method(&mut project, "models", "Order", "Total").unwrap();
        let order = project.package("models").unwrap().lookup_type("Order").unwrap();
        assert!(order.methods().is_empty());
    }

    #[test]
    fn test_bindings_files_and_packages() {
        let (src, mut project) = shop();
        let coder = Coder::default();

        let models = coder.load_package(&src.path().join("models")).unwrap();
        assert_eq!(models.name, "models");
        assert_eq!(models.files().len(), 1);

        let timeout = Binding::new("timeout").with_type(TypeRef::named("int")).with_value("30");
        coder.create_variable(&mut project, "models", "user.go", timeout).unwrap();
        coder
            .create_constant(&mut project, "models", "user.go", Binding::new("Version").with_value("\"1\""))
            .unwrap();
        let err = coder
            .create_variable(&mut project, "models", "user.go", Binding::new("timeout"))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { kind: "variable", .. }));

        let user_file = project.package("models").unwrap().file("user.go").unwrap();
        assert_eq!(user_file.lookup_variable("timeout").unwrap().type_name(), "int");

        let removed = coder.remove_variable(&mut project, "models", "user.go", "timeout").unwrap();
        assert_eq!(removed.value.as_deref(), Some("30"));
        coder.remove_constant(&mut project, "models", "user.go", "Version").unwrap();
        let err = coder
            .remove_constant(&mut project, "models", "user.go", "Version")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "constant", .. }));

        let file = coder.remove_file(&mut project, "models", "user.go").unwrap();
        assert_eq!(file.path, "models/user.go");
        assert!(project.package("models").unwrap().lookup_type("User").is_none());

        let package = coder.remove_package(&mut project, "models").unwrap();
        assert_eq!(package.assets().len(), 2);
        assert!(project.package("models").is_none());
    }

    #[test]
    fn test_edits_decline_missing_parents() {
        let (_src, mut project) = shop();
        let coder = Coder::default();

        let err = coder
            .create_field(&mut project, "models", "Ghost", Field::new("X", TypeRef::named("int")))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "type", .. }));

        let err = coder.create_file(&mut project, "missing", "a.go").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "package", .. }));

        let err = coder.remove_field(&mut project, "models", "User", "Age").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "field", .. }));

        let err = coder
            .create_type(&mut project, "models", "user.go", Type::new("User", TypeKind::Struct))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { kind: "type", .. }));

        // a declined edit leaves the captured declaration alone
        let user = project.package("models").unwrap().lookup_type("User").unwrap();
        assert!(user.content().is_some());
    }

    #[test]
    fn test_store_skips_files_without_emitter() {
        let coder = Coder::default();
        let mut project = Project::new("docs", "/tmp/docs");
        coder.create_package(&mut project, "docs", "docs", "docs").unwrap();
        coder.create_file(&mut project, "docs", "notes.txt").unwrap();
        coder.create_file(&mut project, "docs", "main.go").unwrap();
        coder
            .add_asset(&mut project, "docs", Asset::new("docs/logo.svg", b"<svg/>".to_vec()))
            .unwrap();

        let out = TempDir::new().unwrap();
        let summary = coder.store_project(&project, out.path()).unwrap();
        assert_eq!(summary, StoreSummary { files: 1, assets: 1, skipped: 1 });
        assert_eq!(
            fs::read_to_string(out.path().join("docs/main.go")).unwrap(),
            "package docs\n"
        );
        assert!(!out.path().join("docs/notes.txt").exists());
    }

    fn server() -> (TempDir, Project) {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/svc\n");
        write(dir.path(), "api/api.go", "package api\n\ntype Server struct{}\n");
        write(
            dir.path(),
            "api/routes.go",
            "package api\n\nfunc (s *Server) Routes() {}\n\nfunc (h *Handler) Serve() {}\n",
        );
        let project = Coder::default().load_project(dir.path()).unwrap();
        (dir, project)
    }

    #[test]
    fn test_store_declares_receiver_once_across_files() {
        let (_src, project) = server();
        let out = TempDir::new().unwrap();
        Coder::default().store_project(&project, out.path()).unwrap();

        let api = fs::read_to_string(out.path().join("api/api.go")).unwrap();
        let routes = fs::read_to_string(out.path().join("api/routes.go")).unwrap();
        assert_eq!(api, "package api\n\ntype Server struct{}\n");
        assert_eq!(
            routes,
            "package api\n\nfunc (s *Server) Routes() {}\n\nfunc (h *Handler) Serve() {}\n"
        );
        assert_eq!(format!("{}{}", api, routes).matches("type Server").count(), 1);
    }

    #[test]
    fn test_create_type_replaces_receiver_placeholder() {
        let (_src, mut project) = server();
        let coder = Coder::default();
        project
            .package_mut("api")
            .unwrap()
            .file_mut("api.go")
            .unwrap()
            .add_type(Type::synthetic("Handler"));

        coder
            .create_type(&mut project, "api", "routes.go", Type::new("Handler", TypeKind::Struct))
            .unwrap();

        let api = project.package("api").unwrap();
        let handler = api.lookup_type("Handler").unwrap();
        assert!(!handler.synthetic);
        assert_eq!(handler.pkg_path, "example.com/svc/api");
        assert_eq!(handler.get_method("Serve").unwrap().receiver.as_deref(), Some("Handler"));
        assert_eq!(api.types().filter(|t| t.name == "Handler").count(), 1);

        let err = coder
            .create_type(&mut project, "api", "api.go", Type::new("Handler", TypeKind::Struct))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { kind: "type", .. }));

        let out = TempDir::new().unwrap();
        coder.store_project(&project, out.path()).unwrap();
        let routes = fs::read_to_string(out.path().join("api/routes.go")).unwrap();
        assert_eq!(routes.matches("type Handler struct{}").count(), 1, "{}", routes);
        assert!(routes.contains("func (h *Handler) Serve() {}"));
    }

    #[test]
    fn test_packages_sharing_a_name_are_edited_by_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/tools\n");
        write(dir.path(), "cmd/a/main.go", "package main\n\nfunc main() {}\n");
        write(dir.path(), "cmd/b/main.go", "package main\n\nfunc main() {}\n");
        let coder = Coder::default();
        let mut project = coder.load_project(dir.path()).unwrap();
        assert_eq!(project.packages().iter().filter(|p| p.name == "main").count(), 2);

        coder
            .create_function(&mut project, "cmd/b", "main.go", Function::new("run"))
            .unwrap();
        coder
            .create_constant(
                &mut project,
                "example.com/tools/cmd/a",
                "main.go",
                Binding::new("Version").with_value("\"1\""),
            )
            .unwrap();

        let a = project.package("cmd/a").unwrap().file("main.go").unwrap();
        assert!(a.lookup_function("run").is_none());
        assert!(a.lookup_constant("Version").is_some());
        let b = project.package("cmd/b").unwrap().file("main.go").unwrap();
        assert!(b.lookup_function("run").is_some());
        assert!(b.lookup_constant("Version").is_none());

        let err = coder
            .create_package(&mut project, "main", "example.com/tools/cmd/b", "cmd/b")
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { kind: "package", .. }));
        coder
            .create_package(&mut project, "main", "example.com/tools/cmd/c", "cmd/c")
            .unwrap();

        let removed = coder.remove_package(&mut project, "cmd/a").unwrap();
        assert_eq!(removed.path, "cmd/a");
        assert!(project.package("cmd/b").is_some());
    }

    #[test]
    fn test_store_aborts_on_io_failure() {
        let (_src, project) = shop();
        let out = TempDir::new().unwrap();
        // a regular file where the package directory has to go
        fs::write(out.path().join("models"), "occupied").unwrap();

        let err = Coder::default().store_project(&project, out.path()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io { .. })));
    }
}
