//! Storage abstraction trait
//!
//! This module defines the Storage trait that upload backends implement.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use stowage_core::UploadError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("Upload directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DirectoryMissing(path) => UploadError::UploadDirMissing(path),
            other => UploadError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// File names are flat: a stored file always lives directly under `root()`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Move the file at `source` into storage as `file_name`, replacing any file
    /// already stored under that name. Returns the final path.
    async fn store(&self, source: &Path, file_name: &str) -> StorageResult<PathBuf>;

    /// Check if a file exists
    async fn exists(&self, file_name: &str) -> StorageResult<bool>;

    /// Delete a stored file. Deleting a missing file is not an error.
    async fn delete(&self, file_name: &str) -> StorageResult<()>;

    /// Directory files are stored in
    fn root(&self) -> &Path;
}
