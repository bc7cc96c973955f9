//! Python reconstruction
//!
//! Methods and attributes live inside their class, so classes are emitted
//! whole and no separate method section exists. Docstrings are kept as
//! comments but belong to the body of their class or function.

use super::{indent_all, indent_first, unique_by_span, with_leading, Emitter};
use crate::graph::{Binding, Comment, Field, File, Function, Type};
use crate::language::Language;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonEmitter;

impl Emitter for PythonEmitter {
    fn language(&self) -> Language {
        Language::Python
    }

    /// Module docstring
    fn render_header(&self, file: &File) -> String {
        file.comment
            .as_ref()
            .map(|c| match c.span {
                Some(_) => c.text.trim_end().to_string(),
                None => hash_comment(&c.text),
            })
            .unwrap_or_default()
    }

    fn render_imports(&self, file: &File) -> String {
        unique_by_span(&file.imports, |i| &i.span)
            .into_iter()
            .map(|import| match (import.span.text(), &import.alias) {
                (Some(text), _) => text.to_string(),
                (None, Some(alias)) => format!("import {} as {}", import.path, alias),
                (None, None) => format!("import {}", import.path),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_bindings(&self, bindings: &[Binding], _constants: bool) -> String {
        unique_by_span(bindings, |b| &b.span)
            .into_iter()
            .map(|binding| {
                let text = match binding.span.text() {
                    Some(text) => text.to_string(),
                    None => assignment(
                        &binding.name,
                        binding.ty.as_ref().map(|t| t.name.as_str()),
                        Some(binding.value.as_deref().unwrap_or("None")),
                    ),
                };
                with_leading([leading_comment(binding.comment.as_ref()), None], text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_type(&self, ty: &Type) -> String {
        let annotation = ty.annotation.as_ref().map(|a| a.text.clone());
        let class = match ty.content() {
            Some(text) => text.to_string(),
            None => synthesize_class(ty),
        };
        with_leading([leading_comment(ty.comment.as_ref()), annotation], class)
    }

    fn render_function(&self, function: &Function) -> String {
        with_leading(
            [
                leading_comment(function.comment.as_ref()),
                function.annotation.clone(),
            ],
            function_text(function),
        )
    }

    fn render_methods(&self, _ty: &Type) -> String {
        String::new()
    }
}

/// `#` comments precede their owner; docstrings are part of its body
fn leading_comment(comment: Option<&Comment>) -> Option<String> {
    let comment = comment?;
    match comment.span {
        None => Some(hash_comment(&comment.text)),
        Some(_) if is_docstring(comment) => None,
        Some(_) => Some(comment.text.trim_end().to_string()),
    }
}

fn is_docstring(comment: &Comment) -> bool {
    comment.span.is_some() && !comment.text.trim_start().starts_with('#')
}

fn hash_comment(text: &str) -> String {
    text.lines()
        .map(|line| format!("# {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assignment(name: &str, hint: Option<&str>, value: Option<&str>) -> String {
    let mut text = name.to_string();
    if let Some(hint) = hint.filter(|h| !h.is_empty()) {
        text.push_str(": ");
        text.push_str(hint);
    }
    if let Some(value) = value {
        text.push_str(" = ");
        text.push_str(value);
    }
    text
}

fn synthesize_class(ty: &Type) -> String {
    let bases = if ty.extends.is_empty() {
        String::new()
    } else {
        format!("({})", ty.extends.join(", "))
    };

    let mut body: Vec<String> = Vec::new();
    if let Some(docstring) = ty.comment.as_ref().filter(|c| is_docstring(c)) {
        body.push(indent_first(docstring.text.trim(), INDENT));
    }
    for field in unique_by_span(ty.fields(), |f| &f.span) {
        if let Some(line) = attribute_text(field) {
            body.push(line);
        }
    }
    for method in ty.methods() {
        let decorators = method.annotation.as_ref().map(|a| indent_all(a, INDENT));
        let comment = leading_comment(method.comment.as_ref()).map(|c| indent_first(&c, INDENT));
        let text = match method.content() {
            Some(text) => indent_first(text, INDENT),
            None => indent_all(&function_text(method), INDENT),
        };
        body.push(with_leading([comment, decorators], text));
    }
    if body.is_empty() {
        body.push(format!("{}pass", INDENT));
    }
    format!("class {}{}:\n{}", ty.name, bases, body.join("\n\n"))
}

/// Class attribute line; instance attributes captured inside `__init__`
/// are reproduced by the constructor's own text
fn attribute_text(field: &Field) -> Option<String> {
    let text = match (field.span.text(), field.is_static) {
        (Some(text), true) => text.to_string(),
        (Some(_), false) => return None,
        (None, true) => assignment(&field.name, Some(field.ty.name.as_str()), Some("None")),
        // a bare name is a lookup, not a declaration
        (None, false) if field.ty.name.is_empty() => assignment(&field.name, None, Some("None")),
        (None, false) => assignment(&field.name, Some(field.ty.name.as_str()), None),
    };
    let comment = leading_comment(field.comment.as_ref()).map(|c| indent_first(&c, INDENT));
    Some(with_leading([comment, None], indent_first(&text, INDENT)))
}

fn function_text(function: &Function) -> String {
    if let Some(text) = function.content() {
        return text.to_string();
    }
    let signature = if function.signature.is_empty() {
        match function.receiver {
            Some(_) => format!("def {}(self)", function.name),
            None => format!("def {}()", function.name),
        }
    } else {
        function.signature.clone()
    };
    let body = function.body_text().unwrap_or("pass");
    format!("{}:\n{}", signature, indent_first(body, INDENT))
}
