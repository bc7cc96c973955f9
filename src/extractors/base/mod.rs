// Base extractor shared by every language front-end
//
// - extractor.rs: BaseExtractor (source text, parsing, spans, doc comments)
// - tree_methods.rs: tree navigation helpers

pub mod extractor;
pub mod tree_methods;

pub use extractor::BaseExtractor;
