//! Content reconstruction
//!
//! An [`Emitter`] rebuilds a file's text from its graph entities. The
//! provided [`Emitter::emit`] fixes the section order (header, imports,
//! constants, variables, types, functions, methods) and prefers captured raw
//! span text; the per-language hooks synthesize text only for entities that
//! carry none (e.g. ones created through the structural editor).

pub mod go;
pub mod python;
pub mod rust;

use std::path::Path;

use crate::graph::{Binding, Comment, File, Function, Span, Type};
use crate::language::Language;

pub use go::GoEmitter;
pub use python::PythonEmitter;
pub use rust::RustEmitter;

/// Language-specific rendering hooks plus the generic reconstruction
pub trait Emitter: Send + Sync {
    fn language(&self) -> Language;

    /// File doc comment and package clause
    fn render_header(&self, file: &File) -> String;

    fn render_imports(&self, file: &File) -> String;

    /// `constants == true` for constants, `false` for variables
    fn render_bindings(&self, bindings: &[Binding], constants: bool) -> String;

    fn render_type(&self, ty: &Type) -> String;

    fn render_function(&self, function: &Function) -> String;

    /// Methods declared outside their type's body; empty for languages whose
    /// methods live inside the type
    fn render_methods(&self, ty: &Type) -> String;

    /// Rebuild the file text in the fixed section order
    fn emit(&self, file: &File) -> anyhow::Result<Vec<u8>> {
        let mut sections: Vec<String> = vec![
            self.render_header(file),
            self.render_imports(file),
            self.render_bindings(file.constants(), true),
            self.render_bindings(file.variables(), false),
        ];
        sections.extend(file.types().iter().map(|ty| self.render_type(ty)));
        sections.extend(file.functions().iter().map(|f| self.render_function(f)));
        sections.extend(file.types().iter().map(|ty| self.render_methods(ty)));

        let mut out = sections
            .into_iter()
            .map(|s| s.trim_end().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        Ok(out.into_bytes())
    }
}

/// Emitter for a language
pub fn for_language(language: Language) -> Box<dyn Emitter> {
    match language {
        Language::Go => Box::new(GoEmitter),
        Language::Rust => Box::new(RustEmitter),
        Language::Python => Box::new(PythonEmitter),
    }
}

/// Emitter registered for a file extension (without the dot)
pub fn for_extension(extension: &str) -> Option<Box<dyn Emitter>> {
    Language::from_extension(extension).map(for_language)
}

pub fn for_path(path: impl AsRef<Path>) -> Option<Box<dyn Emitter>> {
    Language::from_path(path).map(for_language)
}

/// Render a comment on its own lines
///
/// Parsed comments are reproduced verbatim. Synthesized ones get the
/// language's line-comment marker. A comment lying inside `owner` (a Python
/// docstring) is part of the owner's text and is skipped.
pub(crate) fn comment_text(
    comment: Option<&Comment>,
    owner: &Span,
    language: Language,
) -> Option<String> {
    let comment = comment?;
    match &comment.span {
        Some(span) if owner.is_captured() && span.start >= owner.start && span.end <= owner.end => {
            None
        }
        Some(_) => Some(comment.text.trim_end().to_string()),
        None => Some(
            comment
                .text
                .lines()
                .map(|line| format!("{} {}", language.line_comment(), line))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

/// Join optional leading blocks (comment, annotation) and the content
pub(crate) fn with_leading(leading: [Option<String>; 2], content: String) -> String {
    let mut lines: Vec<String> = leading.into_iter().flatten().collect();
    lines.push(content);
    lines.join("\n")
}

/// Prefix the first line only; captured text keeps the indentation of its
/// following lines
pub(crate) fn indent_first(text: &str, indent: &str) -> String {
    format!("{}{}", indent, text)
}

/// Prefix every non-empty line
pub(crate) fn indent_all(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Items whose captured span was already seen are dropped; entities
/// declared together (`a, b int`) share one span and are emitted once
pub(crate) fn unique_by_span<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    span: impl Fn(&T) -> &Span,
) -> Vec<&'a T> {
    let mut unique: Vec<&T> = Vec::new();
    for item in items {
        let current = span(item);
        let repeated = current.is_captured()
            && unique.iter().any(|seen| span(seen).same_range(current));
        if !repeated {
            unique.push(item);
        }
    }
    unique
}
