//! Query compilation.
//!
//! Turns raw user input into a token-match expression over the
//! indexed payloads:
//!
//! - input longer than the byte bound (or empty) compiles to nothing,
//!   and the caller falls through to the unfiltered all-documents
//!   path
//! - input shorter than the n-gram size becomes a single prefix
//!   token (`{query}*`), which is what lets short queries reach the
//!   tail-anchored short tokens emitted at index time
//! - anything else becomes its n-gram windows joined by spaces;
//!   matched with implicit AND, this approximates substring
//!   containment, since every window of the query must appear as a
//!   window of the indexed text
//!
//! The output is an opaque expression string consumed by the
//! retrieval engine's match predicate.

use unicode_normalization::UnicodeNormalization;

use crate::core::indexer::NgramTokenizer;

/// Raw query byte-length bound, applied before any processing
pub const MAX_QUERY_BYTES: usize = 64;

/// Compiles raw queries into token-match expressions
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    tokenizer: NgramTokenizer,
    max_query_bytes: usize,
}

impl QueryCompiler {
    /// Create a compiler for the given n-gram size with the default
    /// length bound.
    pub fn new(ngram_size: usize) -> Self {
        Self::with_limit(ngram_size, MAX_QUERY_BYTES)
    }

    /// Create a compiler with an explicit raw-length bound in bytes.
    pub fn with_limit(ngram_size: usize, max_query_bytes: usize) -> Self {
        Self {
            tokenizer: NgramTokenizer::new(ngram_size),
            max_query_bytes,
        }
    }

    /// Compile a raw query into a match expression.
    ///
    /// Returns `None` when the query is empty or exceeds the raw
    /// byte-length bound; the caller treats both exactly like an
    /// absent query (the unfiltered path), never as an error.
    pub fn compile(&self, raw: &str) -> Option<String> {
        if raw.is_empty() || raw.len() > self.max_query_bytes {
            return None;
        }

        // Trim first, then fold compatibility-equivalent forms
        // (full-width vs half-width, etc.) onto a single shape.
        let normalized: String = raw.trim().nfkc().collect();

        if normalized.chars().count() < self.tokenizer.ngram_size() {
            return Some(format!("{normalized}*"));
        }

        // Query side uses the primary windows only: the tail-suffix
        // tokens exist in indexed payloads but not necessarily in
        // other documents containing the query text, so emitting
        // them here would reject legitimate matches.
        Some(self.tokenizer.windows(&normalized).join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(3)
    }

    #[test]
    fn test_compile_long_query_into_windows() {
        assert_eq!(
            compiler().compile("hello").as_deref(),
            Some("hel ell llo")
        );
    }

    #[test]
    fn test_compile_never_emits_tail_suffixes() {
        let expr = compiler().compile("hello").unwrap();
        assert!(!expr.split_whitespace().any(|t| t.len() < 3));
    }

    #[test]
    fn test_compile_short_query_into_prefix() {
        assert_eq!(compiler().compile("ab").as_deref(), Some("ab*"));
        assert_eq!(compiler().compile("あ").as_deref(), Some("あ*"));
    }

    #[test]
    fn test_compile_exact_ngram_length_is_single_window() {
        assert_eq!(compiler().compile("abc").as_deref(), Some("abc"));
    }

    #[test]
    fn test_compile_empty_query() {
        assert_eq!(compiler().compile(""), None);
    }

    #[test]
    fn test_compile_over_long_query() {
        let long = "x".repeat(MAX_QUERY_BYTES + 1);
        assert_eq!(compiler().compile(&long), None);
    }

    #[test]
    fn test_compile_at_exact_byte_bound() {
        let bounded = "x".repeat(MAX_QUERY_BYTES);
        assert!(compiler().compile(&bounded).is_some());
    }

    #[test]
    fn test_byte_bound_applies_before_normalization() {
        // 22 three-byte characters exceed 64 bytes despite being only
        // 22 characters.
        let wide = "あ".repeat(22);
        assert_eq!(compiler().compile(&wide), None);
    }

    #[test]
    fn test_compile_trims_whitespace() {
        assert_eq!(
            compiler().compile("  hello  ").as_deref(),
            Some("hel ell llo")
        );
    }

    #[test]
    fn test_compile_whitespace_only_is_bare_wildcard() {
        // Trims to nothing and falls into the prefix branch: a bare
        // wildcard that matches every indexed document.
        assert_eq!(compiler().compile("   ").as_deref(), Some("*"));
    }

    #[test]
    fn test_compile_applies_nfkc() {
        // Full-width latin folds to ASCII.
        assert_eq!(
            compiler().compile("ｈｅｌｌｏ").as_deref(),
            Some("hel ell llo")
        );
        // Half-width katakana folds to full-width.
        assert_eq!(compiler().compile("ｱｲ").as_deref(), Some("アイ*"));
    }

    #[test]
    fn test_compile_multibyte_windows() {
        assert_eq!(
            compiler().compile("こんにちは").as_deref(),
            Some("こんに んにち にちは")
        );
    }

    #[test]
    fn test_custom_limit() {
        let tight = QueryCompiler::with_limit(3, 4);
        assert!(tight.compile("abcd").is_some());
        assert_eq!(tight.compile("abcde"), None);
    }
}
