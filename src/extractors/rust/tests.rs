use super::*;
use crate::graph::TypeKind;

fn inspect(source: &str) -> File {
    RustInspector::default()
        .extract("src/shapes.rs", source.as_bytes())
        .expect("Rust source should extract")
}

#[test]
fn test_struct_fields_and_attributes() {
    let file = inspect(
        r#"
/// A point on the plane
#[derive(Debug, Clone)]
pub struct Point {
    /// Horizontal
    pub x: f64,
    #[serde(default)]
    y: f64,
    pub tags: Vec<String>,
    pub index: HashMap<String, usize>,
}

struct Meters(pub f64, pub u32);
"#,
    );

    let point = file.lookup_type("Point").unwrap();
    assert_eq!(point.kind, TypeKind::Struct);
    assert!(point.exported);
    assert!(!point.synthetic);
    assert!(point
        .comment
        .as_ref()
        .unwrap()
        .text
        .contains("A point on the plane"));
    let annotation = point.annotation.as_ref().unwrap();
    assert_eq!(annotation.text, "#[derive(Debug, Clone)]");
    assert!(point.content().unwrap().starts_with("pub struct Point"));

    let fields = point.fields();
    assert_eq!(fields.len(), 4);
    assert!(fields[0].exported);
    assert!(fields[0].comment.as_ref().unwrap().text.contains("Horizontal"));
    assert!(!fields[1].exported);
    assert_eq!(fields[1].annotation.as_deref(), Some("#[serde(default)]"));

    let tags = point.get_field("tags").unwrap();
    assert_eq!(tags.ty.kind, TypeKind::Slice);
    assert_eq!(tags.ty.component.as_deref(), Some("String"));

    let index = point.get_field("index").unwrap();
    assert_eq!(index.ty.kind, TypeKind::Map);
    assert_eq!(index.ty.key.as_deref(), Some("String"));
    assert_eq!(index.ty.component.as_deref(), Some("usize"));

    let meters = file.lookup_type("Meters").unwrap();
    assert!(!meters.exported);
    let names: Vec<&str> = meters.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["0", "1"]);
    assert_eq!(meters.fields()[1].ty.name, "u32");
}

#[test]
fn test_enum_variants_are_constant_fields() {
    let file = inspect(
        r#"
pub enum Shape {
    Circle { radius: f64 },
    Square(f64),
    Empty,
}
"#,
    );
    let shape = file.lookup_type("Shape").unwrap();
    assert_eq!(shape.kind, TypeKind::Enum);
    let fields = shape.fields();
    assert_eq!(fields.len(), 3);
    assert!(fields.iter().all(|f| f.is_constant && f.exported));
    assert_eq!(fields[0].name, "Circle");
    assert_eq!(fields[0].ty.name, "{ radius: f64 }");
    assert_eq!(fields[1].ty.name, "(f64)");
    assert_eq!(fields[2].ty.name, "");
}

#[test]
fn test_trait_is_interface_with_supertraits() {
    let file = inspect(
        r#"
pub trait Area: Debug + Clone {
    fn area(&self) -> f64;

    fn unit() -> &'static str {
        "m2"
    }
}
"#,
    );
    let area = file.lookup_type("Area").unwrap();
    assert_eq!(area.kind, TypeKind::Interface);
    assert_eq!(area.extends, vec!["Debug".to_string(), "Clone".to_string()]);
    assert_eq!(area.methods().len(), 2);

    let required = area.get_method("area").unwrap();
    assert!(required.body.is_none());
    assert!(!required.is_static);
    assert!(required.exported);
    assert_eq!(required.signature, "fn area(&self) -> f64");
    assert_eq!(required.receiver.as_deref(), Some("Area"));

    let provided = area.get_method("unit").unwrap();
    assert!(provided.body.is_some());
    assert!(provided.is_static);
}

#[test]
fn test_impl_before_declaration_binds_to_declared_type() {
    let file = inspect(
        r#"
impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }
}

pub struct Stack<T> {
    items: Vec<T>,
}
"#,
    );

    let stacks: Vec<_> = file.types().iter().filter(|t| t.name == "Stack").collect();
    assert_eq!(stacks.len(), 1, "exactly one Type named Stack");
    let stack = stacks[0];
    assert!(!stack.synthetic);
    assert_eq!(stack.type_params.len(), 1);
    assert_eq!(stack.methods().len(), 2);

    let new = stack.get_method("new").unwrap();
    assert!(new.is_constructor);
    assert!(new.is_static);
    assert!(new.interface.is_none());

    let push = stack.get_method("push").unwrap();
    assert!(!push.is_static);
    assert!(!push.is_constructor);
    assert_eq!(push.parameters.len(), 1);
    assert_eq!(push.parameters[0].name, "item");
    assert!(file.functions().is_empty());
}

#[test]
fn test_trait_impl_on_foreign_type_synthesizes_once() {
    let file = inspect(
        r#"
impl Display for Celsius {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Celsius {
    fn kelvin(&self) -> f64 {
        self.0 + 273.15
    }
}
"#,
    );

    assert_eq!(file.types().len(), 1);
    let celsius = file.lookup_type("Celsius").unwrap();
    assert!(celsius.synthetic);
    assert_eq!(celsius.implements, vec!["Display".to_string()]);

    let fmt = celsius.get_method("fmt").unwrap();
    assert_eq!(fmt.interface.as_deref(), Some("Display"));
    assert!(fmt.exported);
    assert_eq!(fmt.results[0].ty.name, "fmt::Result");

    let kelvin = celsius.get_method("kelvin").unwrap();
    assert!(kelvin.interface.is_none());
    assert!(!kelvin.exported);
}

#[test]
fn test_impl_associated_items_and_where_clause() {
    let file = inspect(
        r#"
impl<T> Iterator for Counter<T>
where
    T: Copy,
{
    type Item = u32;
    const STEP: u32 = 1;

    fn next(&mut self) -> Option<u32> {
        None
    }
}

unsafe impl<T> Send for Counter<T> {}
"#,
    );

    let counter = file.lookup_type("Counter").unwrap();
    assert_eq!(counter.methods().len(), 1);

    let iterator = counter.impl_block(Some("Iterator")).unwrap();
    assert_eq!(
        iterator.header.as_deref(),
        Some("impl<T> Iterator for Counter<T>\nwhere\n    T: Copy,")
    );
    let items: Vec<&str> = iterator.items.iter().filter_map(|i| i.text()).collect();
    assert_eq!(items, vec!["type Item = u32;", "const STEP: u32 = 1;"]);

    let send = counter.impl_block(Some("Send")).unwrap();
    assert_eq!(send.header.as_deref(), Some("unsafe impl<T> Send for Counter<T>"));
    assert!(send.items.is_empty());
}

#[test]
fn test_type_alias_shapes_and_comment() {
    let file = inspect(
        r#"
pub type Registry = HashMap<String, Handler>;

/// Result with the crate error
pub type Result<T> = std::result::Result<T, Error>;
"#,
    );
    let registry = file.lookup_type("Registry").unwrap();
    assert_eq!(registry.kind, TypeKind::Map);
    assert_eq!(registry.key_type.as_deref(), Some("String"));
    assert_eq!(registry.component_type.as_deref(), Some("Handler"));
    let comment = registry.comment.as_ref().unwrap();
    assert!(comment.is_synthesized());
    assert_eq!(
        comment.text,
        "Registry is a type alias for HashMap<String, Handler>"
    );

    let result = file.lookup_type("Result").unwrap();
    assert_eq!(result.kind, TypeKind::Alias);
    assert_eq!(result.type_params.len(), 1);
    assert!(!result.comment.as_ref().unwrap().is_synthesized());
}

#[test]
fn test_free_functions_constants_and_statics() {
    let file = inspect(
        r#"
//! Geometry helpers

use std::collections::HashMap;
use std::fmt::Result as FmtResult;

pub const MAX_SIDES: usize = 12;

static mut COUNTER: u32 = 0;

/// Sum of all areas
pub fn total<'a, S: Area>(shapes: &'a [S], scale: f64) -> f64 {
    0.0
}
"#,
    );

    assert!(file.comment.as_ref().unwrap().text.starts_with("//! Geometry helpers"));

    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.imports[0].path, "std::collections::HashMap");
    assert!(file.imports[0].alias.is_none());
    assert_eq!(file.imports[1].path, "std::fmt::Result");
    assert_eq!(file.imports[1].alias.as_deref(), Some("FmtResult"));

    let max = file.lookup_constant("MAX_SIDES").unwrap();
    assert!(max.exported);
    assert_eq!(max.value.as_deref(), Some("12"));
    assert_eq!(max.ty.as_ref().unwrap().name, "usize");

    let counter = file.lookup_variable("COUNTER").unwrap();
    assert!(!counter.exported);
    assert_eq!(counter.value.as_deref(), Some("0"));

    let total = file.lookup_function("total").unwrap();
    assert!(total.exported);
    assert!(!total.is_static);
    assert!(!total.is_constructor);
    assert!(total.receiver.is_none());
    assert_eq!(total.type_params.len(), 2);
    assert_eq!(total.type_params[1].name, "S");
    assert_eq!(total.type_params[1].constraint, "Area");
    assert_eq!(total.parameters.len(), 2);
    assert!(total.parameters[0].ty.pointer);
    assert_eq!(
        total.signature,
        "pub fn total<'a, S: Area>(shapes: &'a [S], scale: f64) -> f64"
    );
    assert!(total.comment.as_ref().unwrap().text.contains("Sum of all areas"));
}

#[test]
fn test_import_path_is_module_path() {
    let inspector = RustInspector::default();
    let info = ProjectInfo {
        root: std::path::PathBuf::from("/tmp/geo"),
        kind: "rust".to_string(),
        name: "geo".to_string(),
        module: None,
        repository_url: None,
    };
    assert_eq!(inspector.import_path("", &info), "crate");
    assert_eq!(inspector.import_path("src", &info), "crate");
    assert_eq!(inspector.import_path("src/shapes/round", &info), "crate::shapes::round");
}

#[test]
fn test_syntax_error_fails_the_file() {
    let err = RustInspector::default()
        .extract("src/broken.rs", b"pub struct {\n")
        .unwrap_err();
    assert!(format!("{:#}", err).contains("src/broken.rs"));
}
