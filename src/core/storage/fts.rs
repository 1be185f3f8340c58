//! Tantivy integration for the n-gram full-text index.
//!
//! This module wraps Tantivy operations for creating, rebuilding
//! and reading the index artifact.
//!
//! Index payloads are pre-tokenized: the builder joins a document's
//! n-gram tokens with single spaces, so the indexed field uses a
//! whitespace analyzer that splits the payload back into exactly
//! those tokens. A lowercase filter preserves case-insensitive
//! matching; the retrieval engine lowercases its query terms to
//! match.

use crate::core::error::{KashidexError, Result};
use crate::core::types::IndexEntry;
use std::path::Path;
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, FAST, INDEXED, STORED,
};
use tantivy::tokenizer::{LowerCaser, TextAnalyzer, WhitespaceTokenizer};
use tantivy::{doc, Index, IndexReader, IndexWriter, TantivyDocument};

/// Current schema version
/// Version 1: Initial schema (words + doc_id single-record layout)
pub const SCHEMA_VERSION: u32 = 1;

/// Registered name of the payload analyzer
const PAYLOAD_TOKENIZER: &str = "payload_whitespace";

/// Index writer heap size (50MB)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Create the Tantivy schema for index records
///
/// Fields:
/// - words: space-joined n-gram payload (TEXT via whitespace
///   analyzer | STORED)
/// - doc_id: corpus document ID (u64, INDEXED | STORED | FAST; the
///   fast column drives the descending-ID result order)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    let words_indexing = TextFieldIndexing::default()
        .set_tokenizer(PAYLOAD_TOKENIZER)
        .set_index_option(IndexRecordOption::Basic);
    let words_options = TextOptions::default()
        .set_indexing_options(words_indexing)
        .set_stored();
    builder.add_text_field("words", words_options);

    builder.add_u64_field("doc_id", INDEXED | STORED | FAST);

    builder.build()
}

fn register_payload_tokenizer(index: &Index) {
    let analyzer = TextAnalyzer::builder(WhitespaceTokenizer::default())
        .filter(LowerCaser)
        .build();
    index.tokenizers().register(PAYLOAD_TOKENIZER, analyzer);
}

/// Open the index for reading only, without taking the writer lock
///
/// Query traffic goes through this path so unbounded concurrent
/// readers never contend with each other (or with a builder's
/// exclusive writer).
pub fn open_read_only(index_dir: &Path) -> Result<Index> {
    if !index_dir.exists() {
        return Err(KashidexError::IndexNotFound(
            index_dir.display().to_string(),
        ));
    }

    let index = Index::open_in_dir(index_dir)
        .map_err(|e| KashidexError::StorageError(format!("Failed to open index: {e}")))?;
    register_payload_tokenizer(&index);
    Ok(index)
}

/// Tantivy index wrapper
pub struct FtsIndex {
    /// Tantivy index instance
    index: Index,

    /// Schema definition
    schema: Schema,

    /// Index writer (for staging entries)
    ///
    /// Only ever `None` transiently inside [`rollback`], which must
    /// move the writer out to replace it.
    ///
    /// [`rollback`]: Self::rollback
    writer: Option<IndexWriter>,
}

impl std::fmt::Debug for FtsIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtsIndex")
            .field("schema", &"<schema>")
            .finish()
    }
}

impl FtsIndex {
    /// Create a new index at the given path
    pub fn create(index_dir: &Path) -> Result<Self> {
        let schema = create_schema();

        std::fs::create_dir_all(index_dir)?;

        let index = Index::create_in_dir(index_dir, schema.clone())
            .map_err(|e| KashidexError::StorageError(format!("Failed to create index: {e}")))?;
        register_payload_tokenizer(&index);

        let writer = index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| KashidexError::StorageError(format!("Failed to create writer: {e}")))?;

        Ok(Self {
            index,
            schema,
            writer: Some(writer),
        })
    }

    /// Discard any existing index artifact and create a fresh one
    ///
    /// Rebuilds are wholesale: the prior artifact is never patched in
    /// place.
    pub fn recreate(index_dir: &Path) -> Result<Self> {
        if index_dir.exists() {
            std::fs::remove_dir_all(index_dir)?;
        }
        Self::create(index_dir)
    }

    /// Open an existing index
    pub fn open(index_dir: &Path) -> Result<Self> {
        if !index_dir.exists() {
            return Err(KashidexError::IndexNotFound(
                index_dir.display().to_string(),
            ));
        }

        let index = Index::open_in_dir(index_dir)
            .map_err(|e| KashidexError::StorageError(format!("Failed to open index: {e}")))?;
        register_payload_tokenizer(&index);

        let schema = index.schema();

        let writer = index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| KashidexError::StorageError(format!("Failed to create writer: {e}")))?;

        Ok(Self {
            index,
            schema,
            writer: Some(writer),
        })
    }

    fn writer_mut(&mut self) -> Result<&mut IndexWriter> {
        self.writer
            .as_mut()
            .ok_or_else(|| KashidexError::StorageError("index writer unavailable".to_string()))
    }

    /// Stage one index record
    ///
    /// Staged records become durable at the next [`commit`]; a
    /// [`rollback`] discards everything staged since the last commit,
    /// which is what keeps batches atomic.
    ///
    /// [`commit`]: Self::commit
    /// [`rollback`]: Self::rollback
    pub fn add_entry(&mut self, entry: &IndexEntry) -> Result<()> {
        let words = self.words_field()?;
        let doc_id = self.doc_id_field()?;

        self.writer_mut()?
            .add_document(doc!(
                words => entry.words.as_str(),
                doc_id => u64::from(entry.doc_id),
            ))
            .map_err(|e| KashidexError::StorageError(format!("Failed to add entry: {e}")))?;

        Ok(())
    }

    /// Commit staged records to disk
    pub fn commit(&mut self) -> Result<()> {
        self.writer_mut()?
            .commit()
            .map_err(|e| KashidexError::StorageError(format!("Failed to commit: {e}")))?;
        Ok(())
    }

    /// Discard records staged since the last commit
    ///
    /// Tantivy's rollback consumes the writer and hands back a fresh
    /// one bound to the last commit.
    pub fn rollback(&mut self) -> Result<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| KashidexError::StorageError("index writer unavailable".to_string()))?;
        let writer = writer
            .rollback()
            .map_err(|e| KashidexError::StorageError(format!("Failed to rollback: {e}")))?;
        self.writer = Some(writer);
        Ok(())
    }

    /// Get an index reader for searching
    pub fn reader(&self) -> Result<IndexReader> {
        self.index
            .reader()
            .map_err(|e| KashidexError::StorageError(format!("Failed to create reader: {e}")))
    }

    /// Get the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get a reference to the underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Resolve the payload field
    pub fn words_field(&self) -> Result<Field> {
        self.schema
            .get_field("words")
            .map_err(|e| KashidexError::StorageError(format!("Missing words field: {e}")))
    }

    /// Resolve the document-ID field
    pub fn doc_id_field(&self) -> Result<Field> {
        self.schema
            .get_field("doc_id")
            .map_err(|e| KashidexError::StorageError(format!("Missing doc_id field: {e}")))
    }

    /// Dump all committed records as (doc_id, words) pairs, ordered
    /// by descending document ID
    ///
    /// Exists for the `info` tooling and build-verification tests;
    /// query traffic goes through the retrieval engine instead.
    pub fn all_entries(&self) -> Result<Vec<IndexEntry>> {
        use tantivy::collector::TopDocs;
        use tantivy::query::AllQuery;
        use tantivy::schema::Value;
        use tantivy::Order;

        let reader = self.reader()?;
        let searcher = reader.searcher();
        let words = self.words_field()?;

        let total = searcher.num_docs() as usize;
        if total == 0 {
            return Ok(Vec::new());
        }

        let collector = TopDocs::with_limit(total).order_by_fast_field::<u64>("doc_id", Order::Desc);
        let hits = searcher
            .search(&AllQuery, &collector)
            .map_err(|e| KashidexError::StorageError(format!("Failed to list entries: {e}")))?;

        let mut entries = Vec::with_capacity(hits.len());
        for (id, address) in hits {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| KashidexError::StorageError(format!("Failed to load entry: {e}")))?;
            let payload = doc
                .get_first(words)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            entries.push(IndexEntry {
                doc_id: id as u32,
                words: payload,
            });
        }

        Ok(entries)
    }
}
