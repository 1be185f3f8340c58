//! Offline index build orchestration.
//!
//! Walks the corpus in document-ID order and loads one index record
//! per document into the full-text store:
//!
//! 1. Fetch the plain-text projection from the document store
//! 2. Collapse whitespace runs to single spaces
//! 3. Skip placeholder documents
//! 4. Tokenize into n-grams and join into one payload string
//! 5. Stage the record; commit once per batch
//!
//! The build is strictly sequential and owns the index artifact
//! exclusively for its duration. Any per-document failure aborts the
//! whole build: the corpus is static, so a retry would fail
//! identically, and a partially indexed corpus must never go
//! unnoticed.

use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::corpus::DocumentStore;
use crate::core::error::{KashidexError, Result};
use crate::core::indexer::NgramTokenizer;
use crate::core::storage::FtsIndex;
use crate::core::types::{BuildStats, IndexEntry};

/// Text of deliberately blank archive entries
///
/// The scrape pipeline stores this exact marker for songs whose
/// source page carried no content. Such documents contribute no
/// index record at all.
pub const PLACEHOLDER_TEXT: &str = " 何も見つからないお（ ＾ω＾） ";

// Whitespace runs collapse to a single space before tokenization
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace characters to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Offline index builder
///
/// Precondition: document IDs in the corpus are dense and immutable
/// (`1..=max_id`, no gaps). Incremental updates, deletions and
/// renumbering are out of scope; the index is rebuilt wholesale.
pub struct IndexBuilder {
    tokenizer: NgramTokenizer,
    batch_size: u32,
}

impl IndexBuilder {
    /// Create a builder for the given n-gram size and batch size.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is 0.
    pub fn new(ngram_size: usize, batch_size: u32) -> Self {
        assert!(batch_size > 0, "batch_size must be > 0");
        Self {
            tokenizer: NgramTokenizer::new(ngram_size),
            batch_size,
        }
    }

    /// Build the full index from the corpus.
    ///
    /// The caller provides a freshly recreated [`FtsIndex`]; this
    /// method fills and commits it batch by batch. On failure the
    /// in-flight batch is rolled back and the error names the
    /// offending document and batch range.
    pub fn build(&self, corpus: &dyn DocumentStore, index: &mut FtsIndex) -> Result<BuildStats> {
        let start = Instant::now();
        let max_id = corpus.max_id()?;

        tracing::info!(max_id, batch_size = self.batch_size, "starting index build");

        let mut documents_indexed = 0;
        let mut documents_skipped = 0;
        let mut batches_committed = 0;

        let mut batch_start = 1u32;
        while batch_start <= max_id {
            let batch_end = batch_start
                .saturating_add(self.batch_size - 1)
                .min(max_id);

            if let Err(e) = self.build_batch(
                corpus,
                index,
                batch_start,
                batch_end,
                &mut documents_indexed,
                &mut documents_skipped,
            ) {
                // The half-staged batch must not reach the artifact.
                let _ = index.rollback();
                return Err(e);
            }

            index.commit().map_err(|e| KashidexError::BuildFailed {
                doc_id: batch_end,
                batch_start,
                batch_end,
                message: format!("commit failed: {e}"),
            })?;
            batches_committed += 1;

            tracing::info!(batch_start, batch_end, "indexed batch");
            batch_start = batch_end + 1;
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            documents_indexed,
            documents_skipped,
            batches_committed,
            duration_ms,
            "index build complete"
        );

        Ok(BuildStats {
            documents_indexed,
            documents_skipped,
            batches_committed,
            duration_ms,
        })
    }

    fn build_batch(
        &self,
        corpus: &dyn DocumentStore,
        index: &mut FtsIndex,
        batch_start: u32,
        batch_end: u32,
        documents_indexed: &mut usize,
        documents_skipped: &mut usize,
    ) -> Result<()> {
        let fail = |doc_id: u32, message: String| KashidexError::BuildFailed {
            doc_id,
            batch_start,
            batch_end,
            message,
        };

        for doc_id in batch_start..=batch_end {
            let text = corpus
                .document_text(doc_id)
                .map_err(|e| fail(doc_id, e.to_string()))?;

            let normalized = collapse_whitespace(&text);
            if normalized == PLACEHOLDER_TEXT {
                tracing::debug!(doc_id, "skipping placeholder document");
                *documents_skipped += 1;
                continue;
            }

            let words = self.tokenizer.tokenize(&normalized).join(" ");
            index
                .add_entry(&IndexEntry { doc_id, words })
                .map_err(|e| fail(doc_id, e.to_string()))?;
            *documents_indexed += 1;
        }

        Ok(())
    }
}
