//! Document store over a key-value adapter.
//!
//! The archive owns the corpus: immutable documents addressed by
//! contiguous positive integer IDs assigned at scrape time. The
//! indexing and retrieval core only ever reads the plain-text
//! projection of a document; it never mutates the store.

use crate::core::corpus::kv::KvStore;
use crate::core::error::{KashidexError, Result};

/// Read-side contract of the document archive
///
/// Document IDs are dense and immutable: every ID in `1..=max_id`
/// refers to a document (some of which may be placeholder entries).
/// This is a documented precondition of the index builder, not
/// something the store enforces.
pub trait DocumentStore: Send + Sync {
    /// Plain-text projection of the document with the given ID.
    ///
    /// Fails with [`KashidexError::DocumentNotFound`] when the ID is
    /// absent.
    fn document_text(&self, id: u32) -> Result<String>;

    /// Highest valid document ID.
    fn max_id(&self) -> Result<u32>;
}

/// Key under which the archive stores its highest document ID
const MAX_ID_KEY: &str = "max_id";

/// Song archive backed by a key-value adapter.
///
/// Key scheme: `song/{id}` holds the UTF-8 text of one document;
/// `max_id` holds the highest ID as ASCII digits.
#[derive(Debug)]
pub struct SongArchive<K: KvStore> {
    kv: K,
}

impl<K: KvStore> SongArchive<K> {
    /// Wrap a key-value adapter as a song archive.
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn song_key(id: u32) -> String {
        format!("song/{id}")
    }

    /// Store a document's text. Corpus preparation only; the search
    /// core never calls this.
    pub fn put_document(&self, id: u32, text: &str) -> Result<()> {
        self.kv.set(&Self::song_key(id), text.as_bytes())
    }

    /// Record the highest document ID. Corpus preparation only.
    pub fn set_max_id(&self, max_id: u32) -> Result<()> {
        self.kv.set(MAX_ID_KEY, max_id.to_string().as_bytes())
    }

    /// Release the underlying adapter.
    pub fn close(&self) -> Result<()> {
        self.kv.close()
    }
}

impl<K: KvStore> DocumentStore for SongArchive<K> {
    fn document_text(&self, id: u32) -> Result<String> {
        let bytes = match self.kv.get(&Self::song_key(id)) {
            Ok(bytes) => bytes,
            Err(KashidexError::KeyNotFound(_)) => {
                return Err(KashidexError::DocumentNotFound(id));
            }
            Err(e) => return Err(e),
        };

        String::from_utf8(bytes).map_err(|e| {
            KashidexError::StorageError(format!("document {id} is not valid UTF-8: {e}"))
        })
    }

    fn max_id(&self) -> Result<u32> {
        let bytes = self.kv.get(MAX_ID_KEY)?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| KashidexError::StorageError(format!("max_id is not valid UTF-8: {e}")))?;
        text.trim()
            .parse()
            .map_err(|e| KashidexError::StorageError(format!("max_id is not an integer: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corpus::kv::MemoryKvStore;

    fn archive_with(docs: &[(u32, &str)]) -> SongArchive<MemoryKvStore> {
        let archive = SongArchive::new(MemoryKvStore::new());
        let mut max_id = 0;
        for (id, text) in docs {
            archive.put_document(*id, text).unwrap();
            max_id = max_id.max(*id);
        }
        archive.set_max_id(max_id).unwrap();
        archive
    }

    #[test]
    fn test_document_round_trip() {
        let archive = archive_with(&[(1, "hello world"), (2, "goodbye world")]);

        assert_eq!(archive.document_text(1).unwrap(), "hello world");
        assert_eq!(archive.document_text(2).unwrap(), "goodbye world");
        assert_eq!(archive.max_id().unwrap(), 2);
    }

    #[test]
    fn test_absent_document_is_document_not_found() {
        let archive = archive_with(&[(1, "only one")]);

        let err = archive.document_text(99).unwrap_err();
        match err {
            KashidexError::DocumentNotFound(id) => assert_eq!(id, 99),
            other => panic!("expected DocumentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_max_id_surfaces_key_not_found() {
        let archive = SongArchive::new(MemoryKvStore::new());

        let err = archive.max_id().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_multibyte_document_text() {
        let archive = archive_with(&[(1, "何も見つからないお")]);
        assert_eq!(archive.document_text(1).unwrap(), "何も見つからないお");
    }

    #[test]
    fn test_max_id_tolerates_surrounding_whitespace() {
        let archive = SongArchive::new(MemoryKvStore::new());
        archive.kv.set(MAX_ID_KEY, b" 42\n").unwrap();
        assert_eq!(archive.max_id().unwrap(), 42);
    }
}
