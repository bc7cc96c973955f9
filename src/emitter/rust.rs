//! Rust reconstruction
//!
//! Item spans cover whole items; attributes are kept apart from the items
//! and are printed between the doc comment and the item. Methods are
//! regrouped into one `impl` block per implemented trait, inherent methods
//! first.

use super::{comment_text, indent_all, indent_first, unique_by_span, with_leading, Emitter};
use crate::graph::{Binding, Field, File, Function, Span, Type, TypeKind};
use crate::language::Language;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl Emitter for RustEmitter {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn render_header(&self, file: &File) -> String {
        comment_text(file.comment.as_ref(), &Span::default(), Language::Rust).unwrap_or_default()
    }

    fn render_imports(&self, file: &File) -> String {
        unique_by_span(&file.imports, |i| &i.span)
            .into_iter()
            .map(|import| match (import.span.text(), &import.alias) {
                (Some(text), _) => text.to_string(),
                (None, Some(alias)) => format!("use {} as {};", import.path, alias),
                (None, None) => format!("use {};", import.path),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_bindings(&self, bindings: &[Binding], constants: bool) -> String {
        let keyword = if constants { "const" } else { "static" };
        unique_by_span(bindings, |b| &b.span)
            .into_iter()
            .map(|binding| {
                let comment = comment_text(binding.comment.as_ref(), &binding.span, Language::Rust);
                let text = match binding.span.text() {
                    Some(text) => text.to_string(),
                    None => format!(
                        "{}{} {}: {} = {};",
                        visibility(binding.exported),
                        keyword,
                        binding.name,
                        binding.ty.as_ref().map_or("_", |t| t.name.as_str()),
                        binding.value.as_deref().unwrap_or("Default::default()")
                    ),
                };
                with_leading([comment, None], text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_type(&self, ty: &Type) -> String {
        if ty.synthetic {
            return String::new();
        }
        let comment = comment_text(ty.comment.as_ref(), &ty.location, Language::Rust);
        let annotation = ty.annotation.as_ref().map(|a| a.text.clone());
        let item = match ty.content() {
            Some(text) => text.to_string(),
            None => synthesize_type(ty),
        };
        with_leading([comment, annotation], item)
    }

    fn render_function(&self, function: &Function) -> String {
        let comment = comment_text(function.comment.as_ref(), &function.span, Language::Rust);
        with_leading(
            [comment, function.annotation.clone()],
            function_text(function),
        )
    }

    /// One `impl` block per trait; captured headers keep generics and
    /// `where` clauses, associated items precede the methods
    fn render_methods(&self, ty: &Type) -> String {
        if ty.kind == TypeKind::Interface {
            return String::new();
        }

        let mut traits: Vec<Option<&str>> = Vec::new();
        let declared = ty.impl_blocks.iter().map(|b| b.interface.as_deref());
        for key in declared.chain(ty.methods().iter().map(|m| m.interface.as_deref())) {
            if !traits.contains(&key) {
                traits.push(key);
            }
        }
        traits.sort_by_key(|t| t.is_some());

        traits
            .into_iter()
            .map(|trait_name| {
                let block = ty.impl_block(trait_name);
                let header = block
                    .and_then(|b| b.header.clone())
                    .unwrap_or_else(|| impl_header(ty, trait_name));
                let mut members: Vec<String> = block
                    .map(|b| {
                        b.items
                            .iter()
                            .filter_map(|item| item.text())
                            .map(|text| indent_first(text, INDENT))
                            .collect()
                    })
                    .unwrap_or_default();
                members.extend(
                    ty.methods()
                        .iter()
                        .filter(|m| m.interface.as_deref() == trait_name)
                        .map(method_text),
                );
                let open = if header.contains('\n') { "\n{" } else { " {" };
                if members.is_empty() {
                    format!("{}{}}}", header, open)
                } else {
                    format!("{}{}\n{}\n}}", header, open, members.join("\n\n"))
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Header for methods added without a parsed `impl` block
fn impl_header(ty: &Type, trait_name: Option<&str>) -> String {
    let generics = ty.type_params_text('<', '>', ": ");
    let arguments = if ty.type_params.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = ty.type_params.iter().map(|p| p.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    };
    match trait_name {
        Some(name) => format!("impl{} {} for {}{}", generics, name, ty.name, arguments),
        None => format!("impl{} {}{}", generics, ty.name, arguments),
    }
}

fn visibility(exported: bool) -> &'static str {
    if exported {
        "pub "
    } else {
        ""
    }
}

fn synthesize_type(ty: &Type) -> String {
    let vis = visibility(ty.exported);
    let generics = ty.type_params_text('<', '>', ": ");
    match ty.kind {
        TypeKind::Struct if ty.fields().is_empty() => format!("{}struct {}{};", vis, ty.name, generics),
        TypeKind::Struct if is_tuple(ty) => {
            let fields: Vec<String> = ty
                .fields()
                .iter()
                .map(|f| format!("{}{}", visibility(f.exported), f.ty.name))
                .collect();
            format!("{}struct {}{}({});", vis, ty.name, generics, fields.join(", "))
        }
        TypeKind::Struct => {
            let body = member_lines(ty.fields(), |f| {
                format!("{}{}: {}", visibility(f.exported), f.name, f.ty.name)
            });
            format!("{}struct {}{} {{\n{}\n}}", vis, ty.name, generics, body)
        }
        TypeKind::Enum => {
            let body = member_lines(ty.fields(), |f| format!("{}{}", f.name, f.ty.name));
            format!("{}enum {}{} {{\n{}\n}}", vis, ty.name, generics, body)
        }
        TypeKind::Interface => {
            let bounds = if ty.extends.is_empty() {
                String::new()
            } else {
                format!(": {}", ty.extends.join(" + "))
            };
            let methods: Vec<String> = ty
                .methods()
                .iter()
                .map(|m| match m.content() {
                    Some(_) => method_text(m),
                    None => indent_first(&format!("{};", signature_or_default(m)), INDENT),
                })
                .collect();
            format!(
                "{}trait {}{}{} {{\n{}\n}}",
                vis,
                ty.name,
                generics,
                bounds,
                methods.join("\n\n")
            )
        }
        _ => format!(
            "{}type {}{} = {};",
            vis,
            ty.name,
            generics,
            ty.alias_of.as_deref().unwrap_or("()")
        ),
    }
}

fn is_tuple(ty: &Type) -> bool {
    ty.fields()
        .iter()
        .all(|f| f.name.chars().all(|c| c.is_ascii_digit()) && !f.name.is_empty())
}

/// Fields or variants, one per line with their comments and attributes
fn member_lines(fields: &[Field], synthesize: impl Fn(&Field) -> String) -> String {
    unique_by_span(fields, |f| &f.span)
        .into_iter()
        .map(|field| {
            let comment = comment_text(field.comment.as_ref(), &field.span, Language::Rust)
                .map(|c| indent_first(&c, INDENT));
            let annotation = field.annotation.as_ref().map(|a| indent_all(a, INDENT));
            let text = field
                .span
                .text()
                .map(str::to_string)
                .unwrap_or_else(|| synthesize(field));
            with_leading([comment, annotation], format!("{}{},", INDENT, text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn signature_or_default(function: &Function) -> String {
    if function.signature.is_empty() {
        format!("fn {}()", function.name)
    } else {
        function.signature.clone()
    }
}

fn function_text(function: &Function) -> String {
    match function.content() {
        Some(text) => text.to_string(),
        None => format!(
            "{} {}",
            signature_or_default(function),
            function.body_text().unwrap_or("{}")
        ),
    }
}

/// A method inside an `impl` or `trait` body
fn method_text(method: &Function) -> String {
    let comment = comment_text(method.comment.as_ref(), &method.span, Language::Rust)
        .map(|c| indent_first(&c, INDENT));
    let annotation = method.annotation.as_ref().map(|a| indent_all(a, INDENT));
    with_leading([comment, annotation], indent_first(&function_text(method), INDENT))
}
