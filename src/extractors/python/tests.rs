use super::*;
use crate::graph::TypeKind;

fn inspect(source: &str) -> File {
    PythonInspector::default()
        .extract("app/models.py", source.as_bytes())
        .expect("Python source should extract")
}

#[test]
fn test_class_attributes_methods_and_constructor() {
    let file = inspect(
        r#""""Domain models."""

import os
from typing import Optional, List as Seq
from . import helpers

MAX_USERS = 100
default_name: str = "guest"
_cache = {}


# Registry of known users
@dataclass(frozen=True)
class User(Base, metaclass=Meta):
    """A registered user."""

    KIND = "user"
    count: int = 0

    def __init__(self, name: str, age: int = 0):
        self.name = name
        self._age: int = age

    def greet(self, other: "User") -> str:
        return f"hi {other.name}"

    @staticmethod
    def parse(raw: str) -> "User":
        return User(raw)

    @classmethod
    def empty(cls):
        return cls("")

    def _secret(self):
        pass


async def fetch(url: str, *args, **kwargs) -> Optional[User]:
    pass
"#,
    );

    assert!(file.comment.as_ref().unwrap().text.contains("Domain models."));

    let paths: Vec<&str> = file.imports.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["os", "typing.Optional", "typing.List", ".helpers"]);
    assert_eq!(file.imports[2].alias.as_deref(), Some("Seq"));
    assert!(file.imports[1].span.same_range(&file.imports[2].span));

    let max = file.lookup_constant("MAX_USERS").unwrap();
    assert_eq!(max.value.as_deref(), Some("100"));
    assert!(max.exported);
    let default_name = file.lookup_variable("default_name").unwrap();
    assert_eq!(default_name.ty.as_ref().unwrap().name, "str");
    assert!(!file.lookup_variable("_cache").unwrap().exported);

    let user = file.lookup_type("User").unwrap();
    assert_eq!(user.kind, TypeKind::Struct);
    assert_eq!(user.extends, vec!["Base".to_string()]);
    assert_eq!(
        user.annotation.as_ref().unwrap().text,
        "@dataclass(frozen=True)"
    );
    assert!(user.content().unwrap().starts_with("class User"));
    assert!(user.comment.as_ref().unwrap().text.contains("A registered user."));

    let names: Vec<&str> = user.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["KIND", "count", "name", "_age"]);
    let kind = user.get_field("KIND").unwrap();
    assert!(kind.is_static && kind.is_constant);
    let count = user.get_field("count").unwrap();
    assert!(count.is_static && !count.is_constant);
    assert_eq!(count.ty.name, "int");
    let age = user.get_field("_age").unwrap();
    assert!(!age.is_static);
    assert!(!age.exported);
    assert_eq!(age.ty.name, "int");

    let init = user.get_method("__init__").unwrap();
    assert!(init.is_constructor);
    assert!(init.exported);
    assert_eq!(init.parameters.len(), 2);
    assert_eq!(init.parameters[0].name, "name");
    assert_eq!(init.parameters[1].name, "age");
    assert_eq!(init.parameters[1].ty.name, "int");
    assert_eq!(init.receiver.as_deref(), Some("User"));

    let greet = user.get_method("greet").unwrap();
    assert!(!greet.is_static);
    assert_eq!(greet.signature, "def greet(self, other: \"User\") -> str");
    assert_eq!(greet.results[0].ty.name, "str");

    let parse = user.get_method("parse").unwrap();
    assert!(parse.is_static);
    assert_eq!(parse.parameters.len(), 1);
    assert_eq!(parse.annotation.as_deref(), Some("@staticmethod"));
    assert!(parse.content().unwrap().starts_with("def parse"));

    let empty = user.get_method("empty").unwrap();
    assert!(empty.is_static);
    assert!(empty.parameters.is_empty());

    assert!(!user.get_method("_secret").unwrap().exported);

    let fetch = file.lookup_function("fetch").unwrap();
    assert!(fetch.receiver.is_none());
    assert!(fetch.signature.starts_with("async def fetch"));
    let params: Vec<&str> = fetch.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["url", "*args", "**kwargs"]);
    assert_eq!(fetch.results[0].ty.name, "Optional[User]");
}

#[test]
fn test_protocol_and_enum_classes() {
    let file = inspect(
        r#"class Closer(Protocol):
    def close(self) -> None: ...


class Color(enum.Enum):
    RED = 1
    green = 2
"#,
    );
    let closer = file.lookup_type("Closer").unwrap();
    assert_eq!(closer.kind, TypeKind::Interface);
    assert_eq!(closer.methods().len(), 1);

    let color = file.lookup_type("Color").unwrap();
    assert_eq!(color.kind, TypeKind::Enum);
    assert!(color.fields().iter().all(|f| f.is_constant && f.is_static));
    assert_eq!(color.fields().len(), 2);
}

#[test]
fn test_hash_comment_documents_function_without_docstring() {
    let file = inspect("# Adds numbers\ndef add(a: int, b: int) -> int:\n    return a + b\n");
    let add = file.lookup_function("add").unwrap();
    assert_eq!(add.comment.as_ref().unwrap().text, "# Adds numbers");
    assert_eq!(add.span.line, 2);
    assert_eq!(add.parameters.len(), 2);
}

#[test]
fn test_tuple_assignment_pairs_values() {
    let file = inspect("WIDTH, HEIGHT = 640, 480\nx, y = point\n");
    let width = file.lookup_constant("WIDTH").unwrap();
    let height = file.lookup_constant("HEIGHT").unwrap();
    assert_eq!(width.value.as_deref(), Some("640"));
    assert_eq!(height.value.as_deref(), Some("480"));
    assert!(width.span.same_range(&height.span));
    assert!(file.lookup_variable("x").unwrap().value.is_none());
}

#[test]
fn test_package_naming() {
    let inspector = PythonInspector::default();
    let info = ProjectInfo {
        root: std::path::PathBuf::from("/tmp/shop"),
        kind: "python".to_string(),
        name: "shop".to_string(),
        module: None,
        repository_url: None,
    };
    assert_eq!(inspector.import_path("app/models", &info), "app.models");
    assert_eq!(inspector.import_path("", &info), "shop");
    assert_eq!(inspector.package_name(&[], "app/models", &info), "models");
    assert_eq!(inspector.package_name(&[], "", &info), "shop");
}

#[test]
fn test_syntax_error_fails_the_file() {
    let err = PythonInspector::default()
        .extract("app/broken.py", b"def broken(:\n")
        .unwrap_err();
    assert!(format!("{:#}", err).contains("app/broken.py"));
}
