// BaseExtractor: per-call state shared by the language front-ends
//
// One instance lives for exactly one extraction call; it owns the decoded
// source and is never shared between threads.

use anyhow::{anyhow, Context};
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::Error;
use crate::graph::{Comment, Span};
use crate::language::Language;

pub struct BaseExtractor {
    pub language: Language,
    /// Path as given to the extraction call (empty for in-memory sources)
    pub file_path: String,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(language: Language, file_path: &str, source: &[u8]) -> anyhow::Result<Self> {
        let content = String::from_utf8(source.to_vec())
            .map_err(|e| Error::Parse {
                path: display_path(file_path),
                line: line_of_offset(source, e.utf8_error().valid_up_to()),
            })
            .with_context(|| format!("{} source is not valid UTF-8", language))?;

        Ok(Self {
            language,
            file_path: file_path.to_string(),
            content,
        })
    }

    /// Parse the source; any syntax error in the tree fails the call
    pub fn parse(&self) -> anyhow::Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language.tree_sitter_language())
            .map_err(|e| anyhow!("Failed to set parser language for {}: {}", self.language, e))?;

        let tree = parser
            .parse(&self.content, None)
            .ok_or_else(|| anyhow!("Failed to parse file: {}", display_path(&self.file_path)))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = self.first_error_line(&root).unwrap_or(1);
            return Err(Error::Parse {
                path: display_path(&self.file_path),
                line,
            }
            .into());
        }

        debug!(
            "Parsed {} file {} ({} bytes)",
            self.language,
            display_path(&self.file_path),
            self.content.len()
        );
        Ok(tree)
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        self.content
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
            .to_string()
    }

    /// Byte span of a node with its raw text captured
    pub fn span(&self, node: &Node) -> Span {
        Span::new(node.start_byte(), node.end_byte())
            .with_line(node.start_position().row + 1)
            .with_text(self.get_node_text(node))
    }

    /// Span from the start of `first` to the end of `last`
    pub fn span_between(&self, first: &Node, last: &Node) -> Span {
        let (start, end) = (first.start_byte(), last.end_byte());
        Span::new(start, end)
            .with_line(first.start_position().row + 1)
            .with_text(self.content.get(start..end).unwrap_or_default())
    }

    /// Contiguous line comments directly above `node`
    ///
    /// A blank line between the comment block and the node detaches it.
    pub fn find_doc_comment(&self, node: &Node) -> Option<Comment> {
        let mut first: Option<Node> = None;
        let mut last: Option<Node> = None;
        let mut expected_row = node.start_position().row;

        let mut current = node.prev_named_sibling();
        while let Some(sibling) = current {
            // Rust attributes sit between the doc comment and the item
            if sibling.kind() == "attribute_item" && first.is_none() {
                expected_row = sibling.start_position().row;
                current = sibling.prev_named_sibling();
                continue;
            }
            if !sibling.kind().contains("comment") {
                break;
            }
            if sibling.end_position().row + 1 != expected_row
                && sibling.end_position().row != expected_row
            {
                break;
            }
            if last.is_none() {
                last = Some(sibling);
            }
            first = Some(sibling);
            expected_row = sibling.start_position().row;
            current = sibling.prev_named_sibling();
        }

        // A trailing comment on the previous declaration's line is not a doc comment
        let first = first?;
        let last = last?;
        if let Some(before) = first.prev_named_sibling() {
            if before.end_position().row == first.start_position().row {
                return None;
            }
        }

        let span = self.span_between(&first, &last);
        let text = span.text.clone().unwrap_or_default();
        Some(Comment::parsed(text, span))
    }

    fn first_error_line(&self, node: &Node) -> Option<usize> {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children.iter().find_map(|child| self.first_error_line(child))
    }
}

fn display_path(file_path: &str) -> String {
    if file_path.is_empty() {
        "<source>".to_string()
    } else {
        file_path.to_string()
    }
}

fn line_of_offset(source: &[u8], offset: usize) -> usize {
    source[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_first_error_line() {
        let source = b"package main\n\nfunc ok() {}\n\nfunc broken( {\n";
        let base = BaseExtractor::new(Language::Go, "main.go", source).unwrap();
        let err = base.parse().unwrap_err();
        let parse = err.downcast_ref::<Error>().expect("typed parse error");
        match parse {
            Error::Parse { path, line } => {
                assert_eq!(path, "main.go");
                assert!(*line >= 5, "error line was {}", line);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_failure() {
        let source = b"package main\n\xff\xfe\n";
        let err = BaseExtractor::new(Language::Go, "bad.go", source)
            .err()
            .expect("invalid UTF-8 must fail");
        assert!(err.chain().any(|e| e.to_string().contains("bad.go")));
    }

    #[test]
    fn test_doc_comment_detached_by_blank_line() {
        let source = "package main\n\n// detached\n\n// Attached docs\n// second line\nfunc F() {}\n";
        let base = BaseExtractor::new(Language::Go, "f.go", source.as_bytes()).unwrap();
        let tree = base.parse().unwrap();
        let root = tree.root_node();
        let mut cursor = root.walk();
        let func = root
            .children(&mut cursor)
            .find(|n| n.kind() == "function_declaration")
            .unwrap();

        let comment = base.find_doc_comment(&func).unwrap();
        assert_eq!(comment.text, "// Attached docs\n// second line");
        assert_eq!(comment.span.as_ref().unwrap().line, 5);
    }
}
