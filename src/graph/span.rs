use serde::{Deserialize, Serialize};

/// Half-open byte range anchoring an entity to its source file
///
/// `text` holds the captured raw source for the range when the entity came
/// from a parse; entities created through the structural editor carry no
/// text and are synthesized by the emitters instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// 1-based line of `start`; 0 when the span was not taken from a source
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            line: 0,
            text: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Captured raw source, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_captured(&self) -> bool {
        self.text.is_some()
    }

    /// Same byte range, ignoring captured text
    pub fn same_range(&self, other: &Span) -> bool {
        self.start == other.start && self.end == other.end && !self.is_empty()
    }
}

/// Doc comment or annotation attached to an entity
///
/// Parsed comments keep their raw text including comment markers and carry a
/// span; synthesized comments (e.g. the generated alias description) have no
/// span and are rendered with the target language's line-comment marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Comment {
    pub fn parsed(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span: Some(span),
        }
    }

    pub fn synthesized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.span.is_none()
    }

    /// Comment body without markers, one line per source line
    pub fn plain_text(&self) -> String {
        if self.is_synthesized() {
            return self.text.clone();
        }
        self.text
            .lines()
            .map(|line| {
                let line = line.trim();
                let line = line
                    .strip_prefix("///")
                    .or_else(|| line.strip_prefix("//!"))
                    .or_else(|| line.strip_prefix("//"))
                    .or_else(|| line.strip_prefix('#'))
                    .unwrap_or(line);
                let line = line.trim_start_matches("/*").trim_end_matches("*/");
                let line = line.trim_matches('"');
                line.trim()
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}
