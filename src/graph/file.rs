// File-level entities: File, constants/variables, imports, assets

use serde::{Deserialize, Serialize};

use super::function::Function;
use super::identity::Identity;
use super::named_list::{ItemMut, Named, NamedList, Rename};
use super::span::{Comment, Span};
use super::types::{Type, TypeRef};
use crate::language::Language;
use crate::utils::paths;

/// Package-level constant or variable
///
/// `file` is the path of the owning file, kept for diagnostics only; the
/// file owns the binding, never the other way around.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    /// Literal value as source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    pub file: String,
    pub span: Span,
    /// Range of the enclosing parenthesized declaration block, when grouped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Span>,
    pub exported: bool,
}

pub type Constant = Binding;
pub type Variable = Binding;

impl Binding {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            exported: name.chars().next().is_some_and(char::is_uppercase),
            name,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn type_name(&self) -> &str {
        self.ty.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    /// `pkg:file:line:name` identity of this binding
    pub fn identity(&self, pkg_path: &str) -> Identity {
        Identity::package_level(pkg_path, paths::base_name(&self.file), self.span.line, &self.name)
    }
}

impl Named for Binding {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Rename for Binding {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Alias (`_`, `.`, or a rename); `None` when imported under its own name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub path: String,
    pub span: Span,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
            span: Span::default(),
        }
    }

    /// Name the import is referenced by inside the file
    pub fn local_name(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) => alias,
            None => self
                .path
                .rsplit(['/', '.', ':'])
                .find(|segment| !segment.is_empty())
                .unwrap_or(&self.path),
        }
    }
}

/// Opaque non-source file below a package directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    /// Project-root-relative unix-style path
    pub path: String,
    #[serde(default)]
    pub content: Vec<u8>,
}

impl Asset {
    pub fn new(path: impl Into<String>, content: Vec<u8>) -> Self {
        let path = path.into();
        Self {
            name: paths::base_name(&path).to_string(),
            path,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One source file and the entities declared in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    /// Project-root-relative unix-style path
    pub path: String,
    pub package: String,
    pub import_path: String,
    /// Package clause or module header, when the language has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    types: NamedList<Type>,
    constants: NamedList<Constant>,
    variables: NamedList<Variable>,
    functions: NamedList<Function>,
    #[serde(default)]
    pub imports: Vec<Import>,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: paths::base_name(&path).to_string(),
            path,
            ..Default::default()
        }
    }

    pub fn language(&self) -> Option<Language> {
        Language::from_path(&self.path)
    }

    pub fn extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => "",
        }
    }

    /// Re-home the file under a project-relative path
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.name = paths::base_name(&self.path).to_string();
        let file_path = self.path.clone();
        self.constants.update_all(|c| c.file = file_path.clone());
        self.variables.update_all(|v| v.file = file_path.clone());
    }

    // --- types ---

    pub fn types(&self) -> &[Type] {
        self.types.as_slice()
    }

    pub fn lookup_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn type_mut(&mut self, name: &str) -> Option<ItemMut<'_, Type>> {
        self.types.get_mut(name)
    }

    pub fn add_type(&mut self, ty: Type) -> usize {
        self.types.push(ty)
    }

    pub fn remove_type(&mut self, name: &str) -> Option<Type> {
        self.types.remove(name)
    }

    /// Apply `f` to every type (package backfill, path rewrites)
    pub fn update_types(&mut self, f: impl FnMut(&mut Type)) {
        self.types.update_all(f);
    }

    /// Resolve-or-insert: the single creation point for receiver types, so a
    /// receiver seen by several methods always maps to one Type instance.
    /// `None` for an empty name.
    pub fn type_or_synthetic(&mut self, name: &str) -> Option<ItemMut<'_, Type>> {
        if name.is_empty() {
            return None;
        }
        let position = match self.types.position(name) {
            Some(position) => position,
            None => self.types.push(Type::synthetic(name)),
        };
        self.types.at_mut(position)
    }

    // --- functions ---

    pub fn functions(&self) -> &[Function] {
        self.functions.as_slice()
    }

    pub fn lookup_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<ItemMut<'_, Function>> {
        self.functions.get_mut(name)
    }

    pub fn add_function(&mut self, function: Function) -> usize {
        self.functions.push(function)
    }

    pub fn remove_function(&mut self, name: &str) -> Option<Function> {
        self.functions.remove(name)
    }

    /// Every method of every type in declaration order
    pub fn methods(&self) -> impl Iterator<Item = (&Type, &Function)> {
        self.types
            .iter()
            .flat_map(|ty| ty.methods().iter().map(move |m| (ty, m)))
    }

    // --- constants & variables ---

    pub fn constants(&self) -> &[Constant] {
        self.constants.as_slice()
    }

    pub fn lookup_constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    pub fn add_constant(&mut self, mut constant: Constant) -> usize {
        constant.file = self.path.clone();
        self.constants.push(constant)
    }

    pub fn remove_constant(&mut self, name: &str) -> Option<Constant> {
        self.constants.remove(name)
    }

    pub fn variables(&self) -> &[Variable] {
        self.variables.as_slice()
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn add_variable(&mut self, mut variable: Variable) -> usize {
        variable.file = self.path.clone();
        self.variables.push(variable)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    pub fn add_import(&mut self, import: Import) {
        if !self.imports.iter().any(|i| i.path == import.path && i.alias == import.alias) {
            self.imports.push(import);
        }
    }
}

impl Named for File {
    fn name(&self) -> &str {
        &self.name
    }
}
