//! Core data types for the Kashidex search engine.
//!
//! This module defines the data structures shared across the
//! indexing and retrieval paths: index records, build statistics,
//! and paginated search results.

use serde::{Deserialize, Serialize};

/// One record of the full-text index
///
/// The document ID is stored directly alongside the token payload as
/// a single logical record, so the index never depends on positional
/// correspondence with a separate mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Corpus document ID (1..=max_id, assigned by the archive)
    pub doc_id: u32,

    /// Space-joined n-gram token payload derived from the document text
    pub words: String,
}

/// Statistics from an index build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    /// Number of documents written to the index
    pub documents_indexed: usize,

    /// Number of placeholder documents skipped
    pub documents_skipped: usize,

    /// Number of batches committed
    pub batches_committed: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,
}

/// One page window over an ordered result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matching documents, independent of pagination
    pub total: usize,

    /// Effective page number after clamping (0-based)
    pub page: usize,

    /// 1-based rank of the first row in this window (0 when empty)
    pub first: usize,

    /// 1-based rank of the last row in this window (0 when empty)
    pub last: usize,

    /// Document IDs in this window, in descending document-ID order
    pub doc_ids: Vec<u32>,
}

impl SearchPage {
    /// The empty result set
    pub fn empty() -> Self {
        Self {
            total: 0,
            page: 0,
            first: 0,
            last: 0,
            doc_ids: Vec::new(),
        }
    }

    /// Whether this window holds no rows
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Whether rows exist beyond this window
    pub fn has_next(&self) -> bool {
        self.total > 0 && self.last < self.total
    }

    /// Whether rows exist before this window
    pub fn has_prev(&self) -> bool {
        self.first > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_entry_pairing() {
        let entry = IndexEntry {
            doc_id: 12,
            words: "abc bcd cd d".to_string(),
        };

        assert_eq!(entry.doc_id, 12);
        assert!(entry.words.split_whitespace().count() == 4);
    }

    #[test]
    fn test_search_page_empty() {
        let page = SearchPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_search_page_navigation() {
        let page = SearchPage {
            total: 45,
            page: 1,
            first: 21,
            last: 40,
            doc_ids: (6..=25).rev().collect(),
        };

        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_search_page_final_window() {
        let page = SearchPage {
            total: 45,
            page: 2,
            first: 41,
            last: 45,
            doc_ids: (1..=5).rev().collect(),
        };

        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_build_stats_serialization() {
        let stats = BuildStats {
            documents_indexed: 980,
            documents_skipped: 20,
            batches_committed: 2,
            duration_ms: 1500,
        };

        let json = serde_json::to_string(&stats).unwrap();
        let back: BuildStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.documents_indexed, 980);
        assert_eq!(back.documents_skipped, 20);
    }
}
