//! Go reconstruction
//!
//! Type spans cover the type spec without the `type` keyword and binding
//! spans cover one spec, so declarations are re-wrapped here. Bindings that
//! came from one parenthesized block are emitted as one block again, which
//! keeps `iota` sequences intact.

use super::{comment_text, indent_first, unique_by_span, with_leading, Emitter};
use crate::graph::{Binding, Field, File, Function, Span, Type, TypeKind};
use crate::language::Language;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoEmitter;

impl Emitter for GoEmitter {
    fn language(&self) -> Language {
        Language::Go
    }

    fn render_header(&self, file: &File) -> String {
        let clause = file
            .header
            .as_ref()
            .and_then(|h| h.text())
            .map(str::to_string)
            .unwrap_or_else(|| format!("package {}", file.package));
        let comment = comment_text(file.comment.as_ref(), &Span::default(), Language::Go);
        with_leading([comment, None], clause)
    }

    fn render_imports(&self, file: &File) -> String {
        if file.imports.is_empty() {
            return String::new();
        }
        let mut lines = vec!["import (".to_string()];
        for import in unique_by_span(&file.imports, |i| &i.span) {
            let spec = match (import.span.text(), &import.alias) {
                (Some(text), _) => text.to_string(),
                (None, Some(alias)) => format!("{} \"{}\"", alias, import.path),
                (None, None) => format!("\"{}\"", import.path),
            };
            lines.push(indent_first(&spec, "\t"));
        }
        lines.push(")".to_string());
        lines.join("\n")
    }

    fn render_bindings(&self, bindings: &[Binding], constants: bool) -> String {
        let keyword = if constants { "const" } else { "var" };
        let unique = unique_by_span(bindings, |b| &b.span);

        let mut blocks = Vec::new();
        let mut index = 0;
        while index < unique.len() {
            let first = unique[index];
            let Some(group) = &first.group else {
                let comment = comment_text(first.comment.as_ref(), &first.span, Language::Go);
                blocks.push(with_leading(
                    [comment, None],
                    format!("{} {}", keyword, binding_text(first)),
                ));
                index += 1;
                continue;
            };

            let run = unique[index..]
                .iter()
                .take_while(|b| b.group.as_ref().is_some_and(|g| g.same_range(group)))
                .count()
                .max(1);
            let mut lines = vec![format!("{} (", keyword)];
            for binding in &unique[index..index + run] {
                if let Some(comment) =
                    comment_text(binding.comment.as_ref(), &binding.span, Language::Go)
                {
                    lines.push(indent_first(&comment, "\t"));
                }
                lines.push(indent_first(&binding_text(binding), "\t"));
            }
            lines.push(")".to_string());
            blocks.push(lines.join("\n"));
            index += run;
        }
        blocks.join("\n\n")
    }

    /// A synthetic receiver type is declared elsewhere; only its methods
    /// belong to this file
    fn render_type(&self, ty: &Type) -> String {
        if ty.synthetic {
            return String::new();
        }
        let comment = comment_text(ty.comment.as_ref(), &ty.location, Language::Go);
        let declaration = match ty.content() {
            Some(text) => format!("type {}", text),
            None => format!(
                "type {}{} {}",
                ty.name,
                ty.type_params_text('[', ']', " "),
                type_body(ty)
            ),
        };
        with_leading([comment, None], declaration)
    }

    fn render_function(&self, function: &Function) -> String {
        let comment = comment_text(function.comment.as_ref(), &function.span, Language::Go);
        with_leading([comment, None], function_text(function))
    }

    /// Interface methods live in the interface body
    fn render_methods(&self, ty: &Type) -> String {
        if ty.kind == TypeKind::Interface {
            return String::new();
        }
        ty.methods()
            .iter()
            .map(|m| self.render_function(m))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn binding_text(binding: &Binding) -> String {
    if let Some(text) = binding.span.text() {
        return text.to_string();
    }
    let mut text = binding.name.clone();
    if let Some(ty) = &binding.ty {
        text.push(' ');
        text.push_str(&ty.name);
    }
    if let Some(value) = &binding.value {
        text.push_str(" = ");
        text.push_str(value);
    }
    text
}

fn type_body(ty: &Type) -> String {
    match ty.kind {
        TypeKind::Struct if ty.fields().is_empty() => "struct{}".to_string(),
        TypeKind::Struct => {
            let mut lines = vec!["struct {".to_string()];
            for field in unique_by_span(ty.fields(), |f| &f.span) {
                if let Some(comment) = comment_text(field.comment.as_ref(), &field.span, Language::Go)
                {
                    lines.push(indent_first(&comment, "\t"));
                }
                lines.push(indent_first(&field_text(field), "\t"));
            }
            lines.push("}".to_string());
            lines.join("\n")
        }
        TypeKind::Interface => {
            let mut lines = vec!["interface {".to_string()];
            for embedded in &ty.extends {
                lines.push(format!("\t{}", embedded));
            }
            for method in ty.methods() {
                if let Some(comment) =
                    comment_text(method.comment.as_ref(), &method.span, Language::Go)
                {
                    lines.push(indent_first(&comment, "\t"));
                }
                let text = method
                    .content()
                    .map(str::to_string)
                    .unwrap_or_else(|| method.signature.clone());
                lines.push(indent_first(&text, "\t"));
            }
            lines.push("}".to_string());
            lines.join("\n")
        }
        TypeKind::Slice => format!("[]{}", ty.component_type.as_deref().unwrap_or("any")),
        TypeKind::Map => format!(
            "map[{}]{}",
            ty.key_type.as_deref().unwrap_or("string"),
            ty.component_type.as_deref().unwrap_or("any")
        ),
        TypeKind::Chan => format!("chan {}", ty.component_type.as_deref().unwrap_or("any")),
        TypeKind::Func => ty.alias_of.clone().unwrap_or_else(|| "func()".to_string()),
        TypeKind::Alias | TypeKind::Enum | TypeKind::Other => ty
            .alias_of
            .clone()
            .unwrap_or_else(|| "struct{}".to_string()),
    }
}

fn field_text(field: &Field) -> String {
    if let Some(text) = field.span.text() {
        return text.to_string();
    }
    if field.embedded {
        return field.ty.name.clone();
    }
    let mut text = format!("{} {}", field.name, field.ty.name);
    if let Some(tag) = &field.tag {
        text.push(' ');
        text.push_str(tag);
    }
    text
}

fn function_text(function: &Function) -> String {
    if let Some(text) = function.content() {
        return text.to_string();
    }
    let signature = if function.signature.is_empty() {
        match &function.receiver {
            Some(receiver) => format!("func (r *{}) {}()", receiver, function.name),
            None => format!("func {}()", function.name),
        }
    } else {
        function.signature.clone()
    };
    let body = function.body_text().unwrap_or("{\n}");
    format!("{} {}", signature, body)
}
