//! Paginated retrieval over the n-gram index.
//!
//! Executes compiled match expressions (or the unfiltered
//! all-documents fallback) and returns one stable page window of
//! document IDs per call. Results carry no relevance score: ordering
//! is purely descending document ID, which coincides with descending
//! insertion order given the builder's ID-ordered inserts.

use tantivy::collector::{Count, TopDocs};
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::{Index, IndexReader, Order, Term};

use crate::core::error::{KashidexError, Result};
use crate::core::types::SearchPage;

/// Rows per page window
pub const PAGE_SIZE: usize = 20;

/// Paginated retrieval engine
///
/// Owns the opened index, a reusable reader and the resolved schema
/// fields as immutable state, so one instance serves any number of
/// concurrent callers. Read-only; never takes the writer lock.
pub struct SearchEngine {
    reader: IndexReader,
    words: Field,
    page_size: usize,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl SearchEngine {
    /// Create an engine over an opened index.
    pub fn new(index: &Index, page_size: usize) -> Result<Self> {
        let schema = index.schema();
        let words = schema
            .get_field("words")
            .map_err(|e| KashidexError::SearchFailed(format!("Missing words field: {e}")))?;
        schema
            .get_field("doc_id")
            .map_err(|e| KashidexError::SearchFailed(format!("Missing doc_id field: {e}")))?;
        let reader = index
            .reader()
            .map_err(|e| KashidexError::SearchFailed(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            reader,
            words,
            page_size,
        })
    }

    /// Rows per page window.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Execute a search and return one page window.
    ///
    /// An absent or empty expression selects all documents. Pages
    /// out of range (negative, or past the last page) silently fall
    /// back to the first page rather than erroring.
    pub fn search(&self, expr: Option<&str>, page: i64) -> Result<SearchPage> {
        let query = self.compile_predicate(expr)?;
        let searcher = self.reader.searcher();

        let total = searcher
            .search(&query, &Count)
            .map_err(|e| KashidexError::SearchFailed(format!("Count failed: {e}")))?;
        if total == 0 {
            return Ok(SearchPage::empty());
        }

        let page = if page < 0 || page as usize > total / self.page_size {
            0
        } else {
            page as usize
        };
        let offset = page * self.page_size;

        let collector = TopDocs::with_limit(self.page_size)
            .and_offset(offset)
            .order_by_fast_field::<u64>("doc_id", Order::Desc);
        let window = searcher
            .search(&query, &collector)
            .map_err(|e| KashidexError::SearchFailed(format!("Fetch failed: {e}")))?;

        let doc_ids: Vec<u32> = window.into_iter().map(|(id, _)| id as u32).collect();

        let first = offset + 1;
        let last = first + doc_ids.len() - 1;

        Ok(SearchPage {
            total,
            page,
            first,
            last,
            doc_ids,
        })
    }

    /// Turn a match expression into an executable predicate.
    ///
    /// Expression grammar: whitespace-separated terms with implicit
    /// AND; a trailing `*` marks a prefix match over indexed tokens.
    /// Terms are lowercased to mirror the index analyzer.
    fn compile_predicate(&self, expr: Option<&str>) -> Result<Box<dyn Query>> {
        let expr = match expr {
            Some(e) if !e.trim().is_empty() => e,
            _ => return Ok(Box::new(AllQuery)),
        };

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for raw_term in expr.split_whitespace() {
            let term = raw_term.to_lowercase();
            let query: Box<dyn Query> = if let Some(prefix) = term.strip_suffix('*') {
                let pattern = format!("{}.*", regex::escape(prefix));
                let regex_query = RegexQuery::from_pattern(&pattern, self.words)
                    .map_err(|e| KashidexError::InvalidQuery(format!("Bad prefix term: {e}")))?;
                Box::new(regex_query)
            } else {
                Box::new(TermQuery::new(
                    Term::from_field_text(self.words, &term),
                    IndexRecordOption::Basic,
                ))
            };
            clauses.push((Occur::Must, query));
        }

        match clauses.len() {
            0 => Ok(Box::new(AllQuery)),
            1 => Ok(clauses.remove(0).1),
            _ => Ok(Box::new(BooleanQuery::new(clauses))),
        }
    }

}
