//! Unified service container for Kashidex
//!
//! Wires configuration, the index storage root and the query path
//! together for the adapters on top.

use crate::core::config::Config;
use crate::core::corpus::{DocumentStore, FsKvStore, SongArchive};
use crate::core::error::Result;
use crate::core::indexer::IndexBuilder;
use crate::core::search::{QueryCompiler, SearchEngine};
use crate::core::storage::{IndexMetadata, IndexStorage, SCHEMA_VERSION};
use crate::core::types::{BuildStats, SearchPage};
use chrono::Utc;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Index storage root manager
    pub storage: Arc<IndexStorage>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let storage = Arc::new(IndexStorage::new(config.storage.index_dir.clone()));

        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Open the configured document archive
    pub fn open_corpus(&self) -> Result<SongArchive<FsKvStore>> {
        let kv = FsKvStore::open(self.config.storage.corpus_dir.clone())?;
        Ok(SongArchive::new(kv))
    }

    /// Rebuild the whole index from a corpus
    ///
    /// Discards any prior artifact, runs the batch build, and writes
    /// the metadata sidecar on success.
    pub fn rebuild_index(&self, corpus: &dyn DocumentStore) -> Result<BuildStats> {
        let builder = IndexBuilder::new(
            self.config.indexing.ngram_size,
            self.config.indexing.batch_size,
        );

        let mut index = self.storage.recreate_index()?;
        let stats = builder.build(corpus, &mut index)?;

        self.storage.update_metadata(&IndexMetadata {
            ngram_size: self.config.indexing.ngram_size,
            documents_indexed: stats.documents_indexed,
            documents_skipped: stats.documents_skipped,
            built_at: Utc::now(),
            build_duration_ms: stats.duration_ms,
            schema_version: SCHEMA_VERSION,
        })?;

        Ok(stats)
    }

    /// Open a retrieval engine over the built index
    pub fn open_engine(&self) -> Result<SearchEngine> {
        let index = self.storage.open_read_only()?;
        SearchEngine::new(&index, self.config.search.page_size)
    }

    /// Query compiler matching the built index's n-gram size
    ///
    /// Falls back to the configured size when no metadata exists yet.
    pub fn compiler(&self) -> QueryCompiler {
        let ngram_size = self
            .storage
            .metadata()
            .map(|m| m.ngram_size)
            .unwrap_or(self.config.indexing.ngram_size);
        QueryCompiler::with_limit(ngram_size, self.config.search.max_query_bytes)
    }

    /// Compile and execute a raw query in one step
    ///
    /// Raw input that is empty or over the length bound falls through
    /// to the unfiltered all-documents result, per the archive's
    /// request convention.
    pub fn search(&self, raw_query: &str, page: i64) -> Result<SearchPage> {
        let expr = self.compiler().compile(raw_query);
        let engine = self.open_engine()?;
        engine.search(expr.as_deref(), page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::corpus::MemoryKvStore;
    use tempfile::TempDir;

    fn services_in(temp_dir: &TempDir) -> Services {
        let mut config = Config::default();
        config.storage.index_dir = temp_dir.path().join("index");
        config.storage.corpus_dir = temp_dir.path().join("corpus");
        Services::new(config)
    }

    fn memory_corpus(docs: &[&str]) -> SongArchive<MemoryKvStore> {
        let archive = SongArchive::new(MemoryKvStore::new());
        for (i, text) in docs.iter().enumerate() {
            archive.put_document(i as u32 + 1, text).unwrap();
        }
        archive.set_max_id(docs.len() as u32).unwrap();
        archive
    }

    #[test]
    fn test_services_clone_shares_state() {
        let temp_dir = TempDir::new().unwrap();
        let services = services_in(&temp_dir);
        let cloned = services.clone();

        assert!(Arc::ptr_eq(&services.storage, &cloned.storage));
        assert!(Arc::ptr_eq(&services.config, &cloned.config));
    }

    #[test]
    fn test_rebuild_then_search() {
        let temp_dir = TempDir::new().unwrap();
        let services = services_in(&temp_dir);
        let corpus = memory_corpus(&["hello world", "goodbye world", "hello there"]);

        let stats = services.rebuild_index(&corpus).unwrap();
        assert_eq!(stats.documents_indexed, 3);

        let page = services.search("hello", 0).unwrap();
        assert_eq!(page.doc_ids, [3, 1]);
    }

    #[test]
    fn test_search_without_index_fails() {
        let temp_dir = TempDir::new().unwrap();
        let services = services_in(&temp_dir);

        assert!(services.search("hello", 0).is_err());
    }

    #[test]
    fn test_rebuild_writes_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let services = services_in(&temp_dir);
        let corpus = memory_corpus(&["hello world"]);

        services.rebuild_index(&corpus).unwrap();

        let meta = services.storage.metadata().unwrap();
        assert_eq!(meta.ngram_size, 3);
        assert_eq!(meta.documents_indexed, 1);
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_compiler_follows_index_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.index_dir = temp_dir.path().join("index");
        config.storage.corpus_dir = temp_dir.path().join("corpus");
        config.indexing.ngram_size = 2;
        let services = Services::new(config);

        let corpus = memory_corpus(&["hello world"]);
        services.rebuild_index(&corpus).unwrap();

        // "ab" is two characters: not shorter than the built n-gram
        // size, so it compiles to windows rather than a prefix.
        let expr = services.compiler().compile("ab").unwrap();
        assert_eq!(expr, "ab");
    }
}
