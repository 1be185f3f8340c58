//! Error types and error handling for the Kashidex search engine.
//!
//! This module defines the error types used throughout the
//! application. Presentation-specific error handling (CLI exit
//! codes, output formatting) is handled in the adapter modules.

use thiserror::Error;

/// Result type alias for Kashidex operations
pub type Result<T> = std::result::Result<T, KashidexError>;

/// Main error type for the Kashidex engine
#[derive(Error, Debug)]
pub enum KashidexError {
    #[error("Document not found: {0}")]
    DocumentNotFound(u32),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Index not found at {0}")]
    IndexNotFound(String),

    #[error(
        "Index build failed at document {doc_id} (batch {batch_start}..={batch_end}): {message}"
    )]
    BuildFailed {
        doc_id: u32,
        batch_start: u32,
        batch_end: u32,
        message: String,
    },

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl KashidexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KashidexError::DocumentNotFound(_)
                | KashidexError::KeyNotFound(_)
                | KashidexError::IndexNotFound(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            KashidexError::InvalidQuery(_) | KashidexError::ConfigError(_)
        )
    }

    /// Check if this error aborts an index build
    ///
    /// Build failures are fatal: the corpus is static, so a retry
    /// would fail identically.
    pub fn is_build_fatal(&self) -> bool {
        matches!(
            self,
            KashidexError::BuildFailed { .. } | KashidexError::StorageError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_is_not_found() {
        let err = KashidexError::DocumentNotFound(42);
        assert!(err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_key_not_found_is_not_found() {
        let err = KashidexError::KeyNotFound("song/7".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_invalid_query_is_bad_request() {
        let err = KashidexError::InvalidQuery("unparsable".to_string());
        assert!(err.is_bad_request());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_build_failed_is_fatal() {
        let err = KashidexError::BuildFailed {
            doc_id: 731,
            batch_start: 501,
            batch_end: 1000,
            message: "disk full".to_string(),
        };
        assert!(err.is_build_fatal());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_build_failed_reports_document_and_batch() {
        let err = KashidexError::BuildFailed {
            doc_id: 731,
            batch_start: 501,
            batch_end: 1000,
            message: "disk full".to_string(),
        };
        let msg = err.message();
        assert!(msg.contains("731"));
        assert!(msg.contains("501"));
        assert!(msg.contains("1000"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = KashidexError::from(io_err);
        assert!(!err.is_not_found()); // IoError is internal, not "not found"
    }

    #[test]
    fn test_error_message() {
        let err = KashidexError::DocumentNotFound(9);
        assert!(err.message().contains('9'));
        assert!(err.message().contains("not found"));
    }
}
