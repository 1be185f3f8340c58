//! Kashidex - N-gram Full-Text Search for Archived Song Collections
//!
//! A search engine for a fixed corpus of archived text documents,
//! built on character n-gram indexing via Tantivy. An offline
//! builder tokenizes every document into fixed-length n-grams (plus
//! tail tokens for short-query reachability) and loads them into a
//! read-only index; the online path compiles raw queries into
//! token-match expressions and returns stable, paginated ID windows.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (presentation-agnostic)
//!   - config, error, types, xdg
//!   - corpus (document archive over a KV adapter)
//!   - indexer (tokenizer, batch builds)
//!   - search (query compiler, paginated retrieval)
//!   - storage (Tantivy index artifact + metadata)
//!   - services (unified service container)
//!
//! - **cli**: Operator command-line adapter (depends on core)
//!
//! # Key Properties
//!
//! - Character-based tokenization (UTF-8 safe, never byte-based)
//! - Stable result order: descending document ID, no scoring
//! - Wholesale rebuilds: the index artifact is never patched in
//!   place
//! - Read path safe for unbounded concurrent callers

// Core domain logic (presentation-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{KashidexError, Result};
pub use crate::core::services::Services;
pub use crate::core::types::*;
