//! Core domain logic (presentation-agnostic)
//!
//! This module contains all engine logic that is independent of how
//! the archive is presented (CLI, web layer, etc).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **corpus**: Document archive access (KV adapter seam)
//! - **indexer**: N-gram tokenization and offline index builds
//! - **search**: Query compilation and paginated retrieval
//! - **storage**: Full-text index artifact management
//! - **services**: Unified service container

pub mod config;
pub mod corpus;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{KashidexError, Result};
pub use services::Services;
