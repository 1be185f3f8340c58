//! Storage layer for the n-gram full-text index.
//!
//! This module owns the persisted index artifact: a Tantivy index
//! holding one record per corpus document (document ID alongside its
//! space-joined token payload) plus a metadata sidecar describing
//! how the artifact was built.
//!
//! # Architecture
//!
//! - **FtsIndex**: wraps Tantivy index operations
//! - **IndexStorage**: manages the storage root and metadata

pub(crate) mod fts;
mod meta;

pub use fts::{create_schema, open_read_only, FtsIndex, SCHEMA_VERSION};
pub use meta::{IndexMetadata, IndexStorage};
