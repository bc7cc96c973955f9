// Type, Field and type-reference entities

use serde::{Deserialize, Serialize};
use std::fmt;

use super::function::Function;
use super::identity::Identity;
use super::named_list::{ItemMut, Named, NamedList, Rename};
use super::span::{Comment, Span};

/// Syntactic shape of a type declaration or reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Struct,
    Interface,
    Slice,
    Map,
    Chan,
    Func,
    Alias,
    Enum,
    Other,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Slice => "slice",
            TypeKind::Map => "map",
            TypeKind::Chan => "chan",
            TypeKind::Func => "func",
            TypeKind::Alias => "alias",
            TypeKind::Enum => "enum",
            TypeKind::Other => "other",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, TypeKind::Slice | TypeKind::Map | TypeKind::Chan)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a type as written at a use site
///
/// Container references carry their key/component type names as strings
/// instead of nested resolved types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Full text as written, e.g. `*models.User`, `map[string][]int`
    pub name: String,
    pub kind: TypeKind,
    /// Package qualifier as written (`models` in `models.User`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Import path resolved from the file's imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub pointer: bool,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Other,
            ..Default::default()
        }
    }

    /// Base identifier with pointer, generic and package decoration removed
    pub fn base_name(&self) -> String {
        base_type_name(&self.name)
    }
}

/// Strip pointer/reference markers, trailing generic arguments and any
/// package qualifier, in that order. Returns an empty string when the
/// remainder is not an identifier.
///
/// ```text
/// "*Stack[T]"       => "Stack"
/// "*models.User"    => "User"
/// "&mut Vec<u8>"    => "Vec"
/// "crate::a::Node"  => "Node"
/// "[]int"           => ""
/// ```
pub fn base_type_name(text: &str) -> String {
    let mut rest = text.trim();

    // leading pointer / reference markers
    loop {
        let trimmed = rest
            .trim_start_matches('*')
            .trim_start_matches('&')
            .trim_start();
        let trimmed = trimmed.strip_prefix("mut ").unwrap_or(trimmed).trim_start();
        let trimmed = trimmed.strip_prefix("dyn ").unwrap_or(trimmed).trim_start();
        if trimmed.len() == rest.len() {
            break;
        }
        rest = trimmed;
    }

    // trailing generic parameter list
    if let Some(idx) = rest.find(['[', '<']) {
        if idx > 0 {
            rest = &rest[..idx];
        }
    }

    // package / module qualifier
    if let Some(idx) = rest.rfind("::") {
        rest = &rest[idx + 2..];
    }
    if let Some(idx) = rest.rfind('.') {
        rest = &rest[idx + 1..];
    }

    let rest = rest.trim();
    if is_identifier(rest) {
        rest.to_string()
    } else {
        String::new()
    }
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Generic type parameter (`T any`, `T: Clone`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub constraint: String,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
        }
    }
}

/// Struct/class field, interface element or enum variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Empty for embedded/anonymous fields
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub exported: bool,
    pub embedded: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "constant")]
    pub is_constant: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Default::default()
        }
    }

    /// Embedded field: named after its type
    pub fn embedded(ty: TypeRef) -> Self {
        Self {
            exported: base_type_name(&ty.name)
                .chars()
                .next()
                .is_some_and(char::is_uppercase),
            ty,
            embedded: true,
            ..Default::default()
        }
    }

    /// Name used for display and identity (the type's base name when embedded)
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.ty.base_name()
        } else {
            self.name.clone()
        }
    }

    /// `pkg:Holder:Field` identity of this field
    pub fn identity(&self, pkg_path: &str, holder: &str) -> Identity {
        Identity::field(pkg_path, holder, &self.display_name())
    }
}

impl Named for Field {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Rename for Field {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Everything of one `impl` block except its methods
///
/// Blocks are merged per implemented trait (`None` for inherent impls); the
/// first header seen for a trait wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Source up to the opening brace, generics and `where` clause included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Associated types, consts and macro calls in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Span>,
}

/// Type declaration (or synthetic type created for a method receiver)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    pub package: String,
    pub pkg_path: String,
    /// Right-hand side for aliases, definitions and container types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    fields: NamedList<Field>,
    methods: NamedList<Function>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Comment>,
    pub location: Span,
    pub exported: bool,
    pub is_pointer: bool,
    /// Created from a method receiver without a declaration in the file
    pub synthetic: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impl_blocks: Vec<ImplBlock>,
}

impl Type {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name = name.into();
        Self {
            exported: name.chars().next().is_some_and(char::is_uppercase),
            name,
            kind,
            ..Default::default()
        }
    }

    /// Placeholder for a receiver type never declared in the file
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self {
            synthetic: true,
            ..Type::new(name, TypeKind::Struct)
        }
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_slice()
    }

    pub fn methods(&self) -> &[Function] {
        self.methods.as_slice()
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<ItemMut<'_, Field>> {
        self.fields.get_mut(name)
    }

    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.position(name)
    }

    pub fn add_field(&mut self, field: Field) -> usize {
        self.fields.push(field)
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.fields.remove(name)
    }

    pub fn get_method(&self, name: &str) -> Option<&Function> {
        self.methods.get(name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<ItemMut<'_, Function>> {
        self.methods.get_mut(name)
    }

    pub fn add_method(&mut self, method: Function) -> usize {
        self.methods.push(method)
    }

    pub fn remove_method(&mut self, name: &str) -> Option<Function> {
        self.methods.remove(name)
    }

    /// Captured declaration source, when the type came from a parse
    pub fn content(&self) -> Option<&str> {
        self.location.text()
    }

    /// Drop the captured declaration text so emitters re-synthesize the
    /// type from its fields after a structural edit
    pub fn clear_captured(&mut self) {
        self.location.text = None;
    }

    /// Record an implemented interface/trait once
    pub fn add_implements(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() && !self.implements.contains(&name) {
            self.implements.push(name);
        }
    }

    pub fn impl_block(&self, interface: Option<&str>) -> Option<&ImplBlock> {
        self.impl_blocks
            .iter()
            .find(|b| b.interface.as_deref() == interface)
    }

    /// Merge `block` into the entry for the same trait
    pub fn add_impl_block(&mut self, block: ImplBlock) {
        match self
            .impl_blocks
            .iter_mut()
            .find(|b| b.interface == block.interface)
        {
            Some(existing) => {
                if existing.header.is_none() {
                    existing.header = block.header;
                }
                existing.items.extend(block.items);
            }
            None => self.impl_blocks.push(block),
        }
    }

    pub fn add_extends(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() && !self.extends.contains(&name) {
            self.extends.push(name);
        }
    }

    /// `[T any, K comparable]`-style suffix for signatures
    pub fn type_params_text(&self, open: char, close: char, separator: &str) -> String {
        if self.type_params.is_empty() {
            return String::new();
        }
        let params: Vec<String> = self
            .type_params
            .iter()
            .map(|p| {
                if p.constraint.is_empty() {
                    p.name.clone()
                } else {
                    format!("{}{}{}", p.name, separator, p.constraint)
                }
            })
            .collect();
        format!("{}{}{}", open, params.join(", "), close)
    }
}

impl Named for Type {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Rename for Type {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_name_strips_in_order() {
        assert_eq!(base_type_name("*Stack[T]"), "Stack");
        assert_eq!(base_type_name("Stack[K, V]"), "Stack");
        assert_eq!(base_type_name("**Node"), "Node");
        assert_eq!(base_type_name("*models.User"), "User");
        assert_eq!(base_type_name("crate::graph::Node<T>"), "Node");
        assert_eq!(base_type_name("&mut Buffer"), "Buffer");
        assert_eq!(base_type_name("[]int"), "");
        assert_eq!(base_type_name("func()"), "");
        assert_eq!(base_type_name(""), "");
    }

    #[test]
    fn test_field_index_tracks_add_remove() {
        let mut ty = Type::new("User", TypeKind::Struct);
        ty.add_field(Field::new("ID", TypeRef::named("int")));
        ty.add_field(Field::embedded(TypeRef::named("Base")));
        ty.add_field(Field::new("Name", TypeRef::named("string")));
        ty.add_field(Field::new("Email", TypeRef::named("string")));

        assert_eq!(ty.field_position("Name"), Some(2));
        assert!(ty.remove_field("ID").is_some());
        assert!(ty.get_field("ID").is_none());

        for (position, field) in ty.fields().iter().enumerate() {
            if field.name.is_empty() {
                continue;
            }
            assert_eq!(ty.field_position(&field.name), Some(position));
            assert_eq!(ty.get_field(&field.name).unwrap().name, field.name);
        }

        assert!(ty.remove_field("missing").is_none());
        assert_eq!(ty.fields().len(), 3);
    }

    #[test]
    fn test_rename_through_handles() {
        let mut ty = Type::new("User", TypeKind::Struct);
        ty.add_field(Field::new("Mail", TypeRef::named("string")));
        ty.add_method(Function::method("User", "Greet"));

        ty.field_mut("Mail").unwrap().name = "Email".to_string();
        ty.method_mut("Greet").unwrap().name = "Hello".to_string();

        assert!(ty.get_field("Mail").is_none());
        assert_eq!(ty.field_position("Email"), Some(0));
        assert!(ty.get_method("Greet").is_none());
        assert_eq!(ty.get_method("Hello").unwrap().receiver.as_deref(), Some("User"));
    }

    #[test]
    fn test_embedded_field_display_name() {
        let mut ty = TypeRef::named("*sync.Mutex");
        ty.pointer = true;
        let field = Field::embedded(ty);
        assert!(field.embedded);
        assert_eq!(field.name, "");
        assert_eq!(field.display_name(), "Mutex");
        assert!(field.exported);
    }

    #[test]
    fn test_impl_blocks_merge_per_trait() {
        let mut ty = Type::new("Counter", TypeKind::Struct);
        ty.add_impl_block(ImplBlock {
            interface: Some("Iterator".to_string()),
            header: Some("impl Iterator for Counter".to_string()),
            items: vec![Span::new(10, 25).with_text("type Item = u32;")],
        });
        ty.add_impl_block(ImplBlock {
            interface: None,
            header: Some("impl Counter".to_string()),
            items: Vec::new(),
        });
        ty.add_impl_block(ImplBlock {
            interface: Some("Iterator".to_string()),
            header: Some("impl Iterator for crate::Counter".to_string()),
            items: vec![Span::new(40, 52).with_text("const N: u8 = 1;")],
        });

        assert_eq!(ty.impl_blocks.len(), 2);
        let iterator = ty.impl_block(Some("Iterator")).unwrap();
        assert_eq!(iterator.header.as_deref(), Some("impl Iterator for Counter"));
        assert_eq!(iterator.items.len(), 2);
        assert!(ty.impl_block(None).unwrap().items.is_empty());
        assert!(ty.impl_block(Some("Display")).is_none());
    }

    #[test]
    fn test_synthetic_type_defaults() {
        let ty = Type::synthetic("Cache");
        assert!(ty.synthetic);
        assert_eq!(ty.kind, TypeKind::Struct);
        assert!(ty.exported);
        assert!(ty.content().is_none());
    }

    #[test]
    fn test_type_params_text() {
        let mut ty = Type::new("Pair", TypeKind::Struct);
        ty.type_params.push(TypeParam::new("K", "comparable"));
        ty.type_params.push(TypeParam::new("V", "any"));
        assert_eq!(ty.type_params_text('[', ']', " "), "[K comparable, V any]");
        assert_eq!(ty.type_params_text('<', '>', ": "), "<K: comparable, V: any>");
    }
}
