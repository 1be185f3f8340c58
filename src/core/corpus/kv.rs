//! Key-value storage adapters for the document archive.
//!
//! The archive addresses its storage engine through the [`KvStore`]
//! trait so the engine can be swapped without touching the document
//! store. Adapters must translate their engine's missing-key
//! condition into [`KashidexError::KeyNotFound`] rather than leaking
//! engine-specific error text.

use crate::core::error::{KashidexError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage adapter contract for the document archive
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// Fails with [`KashidexError::KeyNotFound`] when the key is
    /// absent.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Store `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Release any resources held by the adapter.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Filesystem-backed adapter: one file per key under a root directory.
///
/// Key segments separated by `/` map to subdirectories, so the
/// archive's `song/{id}` scheme lands in a `song/` directory.
#[derive(Debug)]
pub struct FsKvStore {
    root: PathBuf,
}

impl FsKvStore {
    /// Open an adapter rooted at `root`, creating the directory if
    /// needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of this adapter.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KvStore for FsKvStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        match fs::read(self.key_path(key)) {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(KashidexError::KeyNotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory adapter for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    map: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    /// Create an empty in-memory adapter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let map = self
            .map
            .read()
            .map_err(|_| KashidexError::StorageError("kv store lock poisoned".to_string()))?;
        map.get(key)
            .cloned()
            .ok_or_else(|| KashidexError::KeyNotFound(key.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut map = self
            .map
            .write()
            .map_err(|_| KashidexError::StorageError("kv store lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut map = self
            .map
            .write()
            .map_err(|_| KashidexError::StorageError("kv store lock poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}
