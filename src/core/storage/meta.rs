//! Index storage root management and metadata tracking.
//!
//! The index artifact lives under a single storage root:
//!
//! ```text
//! {index_dir}/
//! ├── meta.json           # Index metadata
//! └── fts/                # Tantivy index
//!     ├── meta.json
//!     └── [segment files]
//! ```
//!
//! Metadata records how the index was built so the retrieval side
//! can refuse an incompatible artifact instead of silently returning
//! wrong results.

use crate::core::error::{KashidexError, Result};
use crate::core::storage::fts::{FtsIndex, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Index metadata sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// N-gram window size the index was built with
    pub ngram_size: usize,

    /// Number of documents written to the index
    pub documents_indexed: usize,

    /// Number of placeholder documents skipped
    pub documents_skipped: usize,

    /// When the build finished
    pub built_at: DateTime<Utc>,

    /// Build duration in milliseconds
    pub build_duration_ms: u64,

    /// Index schema version
    pub schema_version: u32,
}

/// Storage root manager for the index artifact
pub struct IndexStorage {
    /// Root directory holding the index and its metadata
    storage_root: PathBuf,
}

impl IndexStorage {
    /// Create a storage manager rooted at `storage_root`
    pub fn new(storage_root: PathBuf) -> Self {
        Self { storage_root }
    }

    /// Root directory of this storage
    pub fn root(&self) -> &Path {
        &self.storage_root
    }

    fn fts_dir(&self) -> PathBuf {
        self.storage_root.join("fts")
    }

    fn metadata_path(&self) -> PathBuf {
        self.storage_root.join("meta.json")
    }

    /// Whether a built index exists under this root
    pub fn index_exists(&self) -> bool {
        self.fts_dir().exists() && self.metadata_path().exists()
    }

    /// Discard any prior artifact and create a fresh, empty index
    pub fn recreate_index(&self) -> Result<FtsIndex> {
        fs::create_dir_all(&self.storage_root)?;
        if self.metadata_path().exists() {
            fs::remove_file(self.metadata_path())?;
        }
        FtsIndex::recreate(&self.fts_dir())
    }

    /// Open the existing index for reading
    ///
    /// Refuses artifacts written by a different schema version.
    pub fn open_index(&self) -> Result<FtsIndex> {
        let metadata = self.metadata()?;
        if metadata.schema_version != SCHEMA_VERSION {
            return Err(KashidexError::StorageError(format!(
                "index at {} uses schema version {} (current: v{}); rebuild it with \
                 `kashidex build-index`",
                self.storage_root.display(),
                metadata.schema_version,
                SCHEMA_VERSION
            )));
        }
        FtsIndex::open(&self.fts_dir())
    }

    /// Open the existing index for query traffic
    ///
    /// Read-only: never takes the writer lock, so any number of
    /// concurrent searchers can share the artifact. Refuses
    /// artifacts written by a different schema version.
    pub fn open_read_only(&self) -> Result<tantivy::Index> {
        let metadata = self.metadata()?;
        if metadata.schema_version != SCHEMA_VERSION {
            return Err(KashidexError::StorageError(format!(
                "index at {} uses schema version {} (current: v{}); rebuild it with \
                 `kashidex build-index`",
                self.storage_root.display(),
                metadata.schema_version,
                SCHEMA_VERSION
            )));
        }
        crate::core::storage::fts::open_read_only(&self.fts_dir())
    }

    /// Read the index metadata
    pub fn metadata(&self) -> Result<IndexMetadata> {
        let path = self.metadata_path();
        if !path.exists() {
            return Err(KashidexError::IndexNotFound(
                self.storage_root.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&path)?;
        let metadata: IndexMetadata = serde_json::from_str(&contents)?;
        Ok(metadata)
    }

    /// Write the index metadata
    pub fn update_metadata(&self, metadata: &IndexMetadata) -> Result<()> {
        fs::create_dir_all(&self.storage_root)?;
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(self.metadata_path(), json)?;
        Ok(())
    }

    /// Total size of the index artifact on disk, in bytes
    pub fn index_size_bytes(&self) -> Result<u64> {
        fn dir_size(path: &Path) -> std::io::Result<u64> {
            let mut total = 0;
            for dir_entry in fs::read_dir(path)? {
                let dir_entry = dir_entry?;
                let file_type = dir_entry.file_type()?;
                if file_type.is_dir() {
                    total += dir_size(&dir_entry.path())?;
                } else {
                    total += dir_entry.metadata()?.len();
                }
            }
            Ok(total)
        }

        let fts = self.fts_dir();
        if !fts.exists() {
            return Ok(0);
        }
        Ok(dir_size(&fts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn metadata() -> IndexMetadata {
        IndexMetadata {
            ngram_size: 3,
            documents_indexed: 100,
            documents_skipped: 2,
            built_at: Utc::now(),
            build_duration_ms: 1234,
            schema_version: SCHEMA_VERSION,
        }
    }

    #[test]
    fn test_metadata_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        storage.update_metadata(&metadata()).unwrap();

        let back = storage.metadata().unwrap();
        assert_eq!(back.ngram_size, 3);
        assert_eq!(back.documents_indexed, 100);
        assert_eq!(back.documents_skipped, 2);
        assert_eq!(back.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_metadata_missing_is_index_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        assert!(matches!(
            storage.metadata(),
            Err(KashidexError::IndexNotFound(_))
        ));
    }

    #[test]
    fn test_index_exists() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        assert!(!storage.index_exists());

        let mut index = storage.recreate_index().unwrap();
        index.commit().unwrap();
        storage.update_metadata(&metadata()).unwrap();

        assert!(storage.index_exists());
    }

    #[test]
    fn test_open_rejects_schema_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        let mut index = storage.recreate_index().unwrap();
        index.commit().unwrap();
        drop(index);

        let mut meta = metadata();
        meta.schema_version = SCHEMA_VERSION + 1;
        storage.update_metadata(&meta).unwrap();

        let err = storage.open_index().unwrap_err();
        assert!(err.message().contains("schema version"));
    }

    #[test]
    fn test_recreate_clears_stale_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        storage.update_metadata(&metadata()).unwrap();
        let _index = storage.recreate_index().unwrap();

        // A recreated-but-unfinished build must not look complete.
        assert!(storage.metadata().is_err());
    }

    #[test]
    fn test_index_size_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let storage = IndexStorage::new(temp_dir.path().join("index"));

        assert_eq!(storage.index_size_bytes().unwrap(), 0);

        let mut index = storage.recreate_index().unwrap();
        index.commit().unwrap();
        drop(index);

        assert!(storage.index_size_bytes().unwrap() > 0);
    }
}
