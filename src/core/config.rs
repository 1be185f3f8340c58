//! Configuration management for the Kashidex search engine.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{KashidexError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// N-gram window size in characters
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,

    /// Documents per commit batch
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for the index artifact
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Root directory of the document archive
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Rows per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Raw query byte-length bound
    #[serde(default = "default_max_query_bytes")]
    pub max_query_bytes: usize,
}

// Default value functions
fn default_ngram_size() -> usize {
    3
}

fn default_batch_size() -> u32 {
    500
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data/index")
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("./data/corpus")
}

fn default_page_size() -> usize {
    crate::core::search::PAGE_SIZE
}

fn default_max_query_bytes() -> usize {
    crate::core::search::MAX_QUERY_BYTES
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            ngram_size: default_ngram_size(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            corpus_dir: default_corpus_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_query_bytes: default_max_query_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| KashidexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create default configuration
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. KASHIDEX_CONFIG env var
    /// 2. XDG config file (~/.config/kashidex/config.toml)
    /// 3. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("KASHIDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        // Default storage paths into the XDG data directory unless
        // explicitly configured.
        if env::var("KASHIDEX_INDEX_DIR").is_err() && config.storage.index_dir == default_index_dir()
        {
            config.storage.index_dir = xdg.index_dir();
        }
        if env::var("KASHIDEX_CORPUS_DIR").is_err()
            && config.storage.corpus_dir == default_corpus_dir()
        {
            config.storage.corpus_dir = xdg.corpus_dir();
        }

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(ngram_size) = env::var("KASHIDEX_NGRAM_SIZE") {
            if let Ok(n) = ngram_size.parse() {
                self.indexing.ngram_size = n;
            }
        }
        if let Ok(batch_size) = env::var("KASHIDEX_BATCH_SIZE") {
            if let Ok(b) = batch_size.parse() {
                self.indexing.batch_size = b;
            }
        }

        // Storage configuration
        if let Ok(index_dir) = env::var("KASHIDEX_INDEX_DIR") {
            self.storage.index_dir = PathBuf::from(index_dir);
        }
        if let Ok(corpus_dir) = env::var("KASHIDEX_CORPUS_DIR") {
            self.storage.corpus_dir = PathBuf::from(corpus_dir);
        }

        // Search configuration
        if let Ok(page_size) = env::var("KASHIDEX_PAGE_SIZE") {
            if let Ok(p) = page_size.parse() {
                self.search.page_size = p;
            }
        }
        if let Ok(max_bytes) = env::var("KASHIDEX_MAX_QUERY_BYTES") {
            if let Ok(m) = max_bytes.parse() {
                self.search.max_query_bytes = m;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.ngram_size == 0 {
            return Err(KashidexError::ConfigError(
                "N-gram size must be non-zero".to_string(),
            ));
        }

        if self.indexing.batch_size == 0 {
            return Err(KashidexError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        if self.search.page_size == 0 {
            return Err(KashidexError::ConfigError(
                "Page size must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_bytes == 0 {
            return Err(KashidexError::ConfigError(
                "Max query bytes must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  N-gram size: {} chars", self.indexing.ngram_size);
        tracing::info!("  Batch size: {} documents", self.indexing.batch_size);
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Corpus dir: {:?}", self.storage.corpus_dir);
        tracing::info!("  Page size: {} rows", self.search.page_size);
        tracing::info!("  Max query length: {} bytes", self.search.max_query_bytes);
    }
}
