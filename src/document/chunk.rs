//! Byte-bounded document splitting
//!
//! A document whose content exceeds [`CHUNK_LIMIT`] bytes is cut into
//! contiguous, non-overlapping slices numbered from 1. A cut that would land
//! inside a multi-byte character moves back to the previous character
//! boundary.

use super::{Document, CHUNK_LIMIT};

/// Split one document; small documents come back unchanged with part 0
pub fn split(document: Document) -> Vec<Document> {
    split_with_limit(document, CHUNK_LIMIT)
}

pub fn split_all(documents: Vec<Document>) -> Vec<Document> {
    documents.into_iter().flat_map(split).collect()
}

pub(crate) fn split_with_limit(document: Document, limit: usize) -> Vec<Document> {
    if document.content.len() <= limit {
        return vec![document];
    }

    let pieces = slice_bounds(&document.content, limit);
    pieces
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| {
            let mut chunk = Document {
                content: String::new(),
                part: index + 1,
                ..document.clone()
            };
            chunk.set_content(document.content[start..end].to_string());
            chunk
        })
        .collect()
}

/// `(start, end)` byte ranges covering `text` exactly once
fn slice_bounds(text: &str, limit: usize) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + limit).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // limit smaller than one character
            end = text[start..]
                .char_indices()
                .nth(1)
                .map_or(text.len(), |(offset, _)| start + offset);
        }
        bounds.push((start, end));
        start = end;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{content_hash, DocumentKind, CHUNK_SIZE};

    fn doc(content: String) -> Document {
        Document::new(DocumentKind::Function, "pkg/big.go", "Big", content)
    }

    #[test]
    fn test_small_document_is_not_split() {
        let chunks = split(doc("x".repeat(CHUNK_LIMIT)));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].part, 0);
        assert_eq!(chunks[0].content.len(), CHUNK_LIMIT);
    }

    #[test]
    fn test_chunk_count_and_coverage() {
        assert_eq!(CHUNK_LIMIT, 7936);
        for len in [CHUNK_LIMIT + 1, 2 * CHUNK_LIMIT, 2 * CHUNK_LIMIT + 17, CHUNK_SIZE * 5] {
            let content: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
            let chunks = split(doc(content.clone()));

            assert_eq!(chunks.len(), len.div_ceil(CHUNK_LIMIT), "length {}", len);
            let parts: Vec<usize> = chunks.iter().map(|c| c.part).collect();
            assert_eq!(parts, (1..=chunks.len()).collect::<Vec<_>>());
            assert!(chunks.iter().all(|c| c.content.len() <= CHUNK_LIMIT));
            assert!(chunks.iter().all(|c| c.hash == content_hash(&c.content)));
            assert!(chunks.iter().all(|c| c.id() == chunks[0].id()));

            let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
            assert_eq!(joined, content);
        }
    }

    #[test]
    fn test_cuts_respect_char_boundaries() {
        // 3-byte characters never line up with the limit
        let content = "€".repeat(CHUNK_LIMIT);
        let chunks = split(doc(content.clone()));
        assert!(chunks.iter().all(|c| c.content.len() <= CHUNK_LIMIT));
        let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(joined, content);

        let tiny = split_with_limit(doc("ab€".to_string()), 2);
        let pieces: Vec<&str> = tiny.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(pieces, vec!["ab", "€"]);
    }
}
