use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::file::{Asset, File};
use super::named_list::{ItemMut, Named, NamedList};
use super::types::Type;

/// Source directory: the files of one package plus its non-source assets
///
/// The type-name → file-position index is derived lazily on first lookup
/// and dropped by every `&mut` path into `files`, so callers never re-index
/// by hand after bulk mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub import_path: String,
    /// Project-root-relative directory (empty for the root)
    pub path: String,
    files: NamedList<File>,
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(skip)]
    type_index: OnceCell<HashMap<String, usize>>,
}

impl Package {
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Project-wide address: the directory, or the import path for the root
    pub fn key(&self) -> &str {
        if !self.path.is_empty() {
            &self.path
        } else if !self.import_path.is_empty() {
            &self.import_path
        } else {
            &self.name
        }
    }

    pub fn files(&self) -> &[File] {
        self.files.as_slice()
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.get(name)
    }

    pub fn file_mut(&mut self, name: &str) -> Option<ItemMut<'_, File>> {
        self.type_index.take();
        self.files.get_mut(name)
    }

    pub fn add_file(&mut self, file: File) -> usize {
        self.type_index.take();
        self.files.push(file)
    }

    pub fn remove_file(&mut self, name: &str) -> Option<File> {
        self.type_index.take();
        self.files.remove(name)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn add_asset(&mut self, asset: Asset) {
        match self.assets.iter_mut().find(|a| a.path == asset.path) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn remove_asset(&mut self, path: &str) -> Option<Asset> {
        let position = self.assets.iter().position(|a| a.path == path)?;
        Some(self.assets.remove(position))
    }

    /// File declaring `type_name`; a declared type wins over a synthetic
    /// receiver placeholder of the same name in another file
    pub fn type_file(&self, type_name: &str) -> Option<&File> {
        let index = self.type_index.get_or_init(|| self.build_type_index());
        index.get(type_name).and_then(|&idx| self.files.at(idx))
    }

    pub fn lookup_type(&self, type_name: &str) -> Option<&Type> {
        self.type_file(type_name)
            .and_then(|file| file.lookup_type(type_name))
    }

    /// All types across files, declaration order
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.files.iter().flat_map(|f| f.types().iter())
    }

    fn build_type_index(&self) -> HashMap<String, usize> {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, file) in self.files.iter().enumerate() {
            for ty in file.types() {
                match index.get(&ty.name) {
                    None => {
                        index.insert(ty.name.clone(), position);
                    }
                    Some(&existing) => {
                        let existing_is_synthetic = self
                            .files
                            .at(existing)
                            .and_then(|f| f.lookup_type(&ty.name))
                            .is_some_and(|t| t.synthetic);
                        if existing_is_synthetic && !ty.synthetic {
                            index.insert(ty.name.clone(), position);
                        }
                    }
                }
            }
        }
        index
    }
}

impl Named for Package {
    fn name(&self) -> &str {
        self.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::function::Function;
    use crate::graph::types::TypeKind;

    fn file_with_types(path: &str, types: &[&str]) -> File {
        let mut file = File::new(path);
        for name in types {
            file.add_type(Type::new(*name, TypeKind::Struct));
        }
        file
    }

    #[test]
    fn test_lookup_type_across_files() {
        let mut pkg = Package::new("models", "acme/models");
        pkg.add_file(file_with_types("models/user.go", &["User", "Role"]));
        pkg.add_file(file_with_types("models/order.go", &["Order"]));

        assert_eq!(pkg.type_file("Order").unwrap().name, "order.go");
        assert_eq!(pkg.lookup_type("Role").unwrap().name, "Role");
        assert!(pkg.lookup_type("Missing").is_none());
    }

    #[test]
    fn test_index_refreshes_after_mutation_without_explicit_call() {
        let mut pkg = Package::new("models", "acme/models");
        pkg.add_file(file_with_types("models/user.go", &["User"]));
        assert!(pkg.lookup_type("User").is_some());

        // appending a file after the index was built
        pkg.add_file(file_with_types("models/order.go", &["Order"]));
        assert!(pkg.lookup_type("Order").is_some());

        // mutating a file in place
        pkg.file_mut("user.go")
            .unwrap()
            .add_type(Type::new("Profile", TypeKind::Struct));
        assert_eq!(pkg.type_file("Profile").unwrap().name, "user.go");

        // removing a file that shifts positions
        pkg.remove_file("user.go");
        assert!(pkg.lookup_type("User").is_none());
        assert_eq!(pkg.type_file("Order").unwrap().name, "order.go");
    }

    #[test]
    fn test_declared_type_wins_over_synthetic() {
        let mut methods = File::new("models/user_methods.go");
        methods
            .type_or_synthetic("User")
            .unwrap()
            .add_method(Function::method("User", "Greet"));

        let mut pkg = Package::new("models", "acme/models");
        pkg.add_file(methods);
        pkg.add_file(file_with_types("models/user.go", &["User"]));

        let user = pkg.lookup_type("User").unwrap();
        assert!(!user.synthetic);
        assert_eq!(pkg.type_file("User").unwrap().name, "user.go");
    }

    #[test]
    fn test_assets_replace_by_path() {
        let mut pkg = Package::new("web", "acme/web");
        pkg.add_asset(Asset::new("web/index.html", b"<html>".to_vec()));
        pkg.add_asset(Asset::new("web/index.html", b"<html></html>".to_vec()));
        assert_eq!(pkg.assets().len(), 1);
        assert_eq!(pkg.assets()[0].content, b"<html></html>".to_vec());
        assert!(pkg.remove_asset("web/index.html").is_some());
        assert!(pkg.assets().is_empty());
    }
}
