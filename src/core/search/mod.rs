//! Query compilation and paginated retrieval.
//!
//! - **query**: raw input → token-match expression
//! - **engine**: match expression → stable page window of document
//!   IDs

mod engine;
mod query;

pub use engine::{SearchEngine, PAGE_SIZE};
pub use query::{QueryCompiler, MAX_QUERY_BYTES};
