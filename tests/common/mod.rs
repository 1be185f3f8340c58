// Shared fixtures for integration testing

use kashidex::core::config::Config;
use kashidex::core::corpus::{MemoryKvStore, SongArchive};
use kashidex::core::services::Services;
use tempfile::TempDir;

/// A corpus fixture plus the services wired to a temp storage root
#[allow(dead_code)] // Used across integration test binaries
pub struct TestArchive {
    pub dir: TempDir,
    pub services: Services,
    pub corpus: SongArchive<MemoryKvStore>,
}

impl TestArchive {
    /// Build services over a temp dir and an in-memory corpus with
    /// the given documents as IDs 1..=N.
    #[allow(dead_code)]
    pub fn with_documents(docs: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.storage.index_dir = dir.path().join("index");
        config.storage.corpus_dir = dir.path().join("corpus");

        let corpus = SongArchive::new(MemoryKvStore::new());
        for (i, text) in docs.iter().enumerate() {
            corpus.put_document(i as u32 + 1, text).unwrap();
        }
        corpus.set_max_id(docs.len() as u32).unwrap();

        Self {
            dir,
            services: Services::new(config),
            corpus,
        }
    }

    /// Build the index from the fixture corpus.
    #[allow(dead_code)]
    pub fn build(&self) -> kashidex::BuildStats {
        self.services
            .rebuild_index(&self.corpus)
            .expect("index build failed")
    }
}

/// The three-document scenario corpus from the retrieval contract
#[allow(dead_code)]
pub fn scenario_documents() -> Vec<&'static str> {
    vec!["hello world", "goodbye world", "hello there"]
}
