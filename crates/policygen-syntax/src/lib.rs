//! Structural queries over TypeScript sources.
//!
//! `policygen-syntax` is the bottom layer of the policy pipeline. It parses
//! TypeScript with tree-sitter, runs S-expression patterns against the tree,
//! and reifies object-literal properties into typed values.
//!
//! # Architecture
//!
//! ```text
//! source text ──> ParsedSource ──> Pattern::matches ──> MatchRecord
//!                                        │
//!                                        └──> PropertyExtractor ──> StringValue / Vec<StringValue>
//! ```
//!
//! # Example
//!
//! ```
//! use policygen_syntax::{PropertyExtractor, ScalarString, StringValue, parse_typescript};
//!
//! let source = parse_typescript("const x = { name: 'Update' };").unwrap();
//! let object = source
//!     .root()
//!     .named_descendant_for_byte_range(10, 11)
//!     .unwrap();
//!
//! let extractor = PropertyExtractor::new();
//! let name = extractor
//!     .extract(&ScalarString, object, source.text(), "name")
//!     .unwrap();
//! assert_eq!(name, Some(StringValue::Plain("Update".into())));
//! ```

pub mod patterns;
mod property;
mod query;
mod source;

pub use property::{
    LocalizedString, PropertyDescriptor, PropertyError, PropertyExtractor, ReifyContext,
    ScalarString, StringArray, StringValue,
};
pub use query::{MatchRecord, Pattern};
pub use source::{ParsedSource, parse_typescript, string_literal, typescript};

// Re-export tree-sitter node type for downstream crates
pub use tree_sitter::Node;

/// Errors raised while parsing sources or compiling patterns.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("failed to load TypeScript grammar: {0}")]
    Grammar(String),
    #[error("failed to parse TypeScript source")]
    Parse,
    #[error("invalid query: {message}\n{query}")]
    Query { message: String, query: String },
}
