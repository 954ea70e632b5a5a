//! File-based local store adapter.
//!
//! Stores each key as one JSON blob file under a base directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::ports::{LocalStore, LocalStoreError};

/// File-per-key durable store.
#[derive(Debug, Clone)]
pub struct FileLocalStore {
    base_path: PathBuf,
}

impl FileLocalStore {
    /// Creates a store rooted at the given directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

fn io_error(err: std::io::Error) -> LocalStoreError {
    LocalStoreError::Io(err.to_string())
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&path).await.map_err(io_error)?;
        Ok(Some(blob))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        fs::create_dir_all(&self.base_path).await.map_err(io_error)?;
        fs::write(self.blob_path(key), value).await.map_err(io_error)
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(&path).await.map_err(io_error)?;
        }
        Ok(())
    }
}
