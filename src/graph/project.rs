use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::file::File;
use super::named_list::{ItemMut, Named, NamedList};
use super::package::Package;
use super::types::Type;
use crate::language::Language;

/// Root of the graph: every package found below one project root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    /// Project type tag from repository detection (`go`, `rust`, ...)
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    packages: NamedList<Package>,
}

impl Project {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn packages(&self) -> &[Package] {
        self.packages.as_slice()
    }

    /// Package by root-relative directory, then import path, then name
    ///
    /// Directories and import paths are unique within a project; a name
    /// shared by several packages (`main` in `cmd/a` and `cmd/b`) reaches
    /// the first of them only.
    pub fn package(&self, key: &str) -> Option<&Package> {
        self.package_position(key).and_then(|idx| self.packages.at(idx))
    }

    pub fn package_mut(&mut self, key: &str) -> Option<ItemMut<'_, Package>> {
        let position = self.package_position(key)?;
        self.packages.at_mut(position)
    }

    pub fn add_package(&mut self, package: Package) -> usize {
        self.packages.push(package)
    }

    pub fn remove_package(&mut self, key: &str) -> Option<Package> {
        let position = self.package_position(key)?;
        self.packages.remove_at(position)
    }

    fn package_position(&self, key: &str) -> Option<usize> {
        self.packages.position(key).or_else(|| {
            let packages = self.packages.as_slice();
            packages
                .iter()
                .position(|p| !p.import_path.is_empty() && p.import_path == key)
                .or_else(|| packages.iter().position(|p| p.name == key))
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.packages.iter().flat_map(|p| p.files().iter())
    }

    /// File by root-relative path
    pub fn file(&self, path: &str) -> Option<&File> {
        self.files().find(|f| f.path == path)
    }

    /// First type named `name` in any package
    pub fn lookup_type(&self, name: &str) -> Option<(&Package, &Type)> {
        self.packages
            .iter()
            .find_map(|p| p.lookup_type(name).map(|t| (p, t)))
    }
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::TypeKind;

    #[test]
    fn test_package_index_follows_mutation() {
        let mut project = Project::new("shop", "/src/shop");
        project.add_package(Package::new("models", "acme/shop/models").with_path("models"));
        project.add_package(Package::new("api", "acme/shop/api").with_path("api"));
        project.add_package(Package::new("store", "acme/shop/store").with_path("store"));

        assert!(project.remove_package("models").is_some());
        assert!(project.package("models").is_none());
        assert_eq!(project.package("store").unwrap().import_path, "acme/shop/store");
        assert_eq!(project.package("acme/shop/api").unwrap().path, "api");
    }

    #[test]
    fn test_packages_sharing_a_name_stay_addressable() {
        let mut project = Project::new("tools", "/src/tools");
        project.add_package(Package::new("main", "acme/tools/cmd/a").with_path("cmd/a"));
        project.add_package(Package::new("main", "acme/tools/cmd/b").with_path("cmd/b"));
        project.add_package(Package::new("tools", "acme/tools"));

        assert_eq!(project.package("cmd/b").unwrap().import_path, "acme/tools/cmd/b");
        assert_eq!(project.package("acme/tools/cmd/a").unwrap().path, "cmd/a");
        assert_eq!(project.package("main").unwrap().path, "cmd/a");
        // the root package has no directory
        assert_eq!(project.package("acme/tools").unwrap().name, "tools");
        assert_eq!(project.package("tools").unwrap().import_path, "acme/tools");

        project.package_mut("cmd/b").unwrap().path = "cmd/c".to_string();
        assert!(project.package("cmd/b").is_none());
        assert_eq!(project.package("cmd/c").unwrap().import_path, "acme/tools/cmd/b");

        let removed = project.remove_package("cmd/a").unwrap();
        assert_eq!(removed.import_path, "acme/tools/cmd/a");
        assert_eq!(project.package("main").unwrap().path, "cmd/c");
    }

    #[test]
    fn test_lookup_type_through_packages() {
        let mut file = File::new("models/user.go");
        file.add_type(Type::new("User", TypeKind::Struct));
        let mut models = Package::new("models", "acme/shop/models");
        models.add_file(file);

        let mut project = Project::new("shop", "/src/shop");
        project.add_package(models);

        let (pkg, ty) = project.lookup_type("User").unwrap();
        assert_eq!(pkg.name, "models");
        assert_eq!(ty.name, "User");
        assert!(project.file("models/user.go").is_some());
    }
}
