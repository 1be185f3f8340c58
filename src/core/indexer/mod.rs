//! Indexing pipeline: n-gram tokenization and offline index builds.
//!
//! - **tokenizer**: character n-gram tokenizer (pure)
//! - **builder**: batch build orchestration over the document store

mod builder;
mod tokenizer;

pub use builder::{collapse_whitespace, IndexBuilder, PLACEHOLDER_TEXT};
pub use tokenizer::NgramTokenizer;
