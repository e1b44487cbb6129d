use crate::LocalStorage;
use crate::Storage;
use std::sync::Arc;
use stowage_core::{UploadConfig, UploadError};

/// Create the storage backend for an upload configuration
///
/// This is the directory guard for the pipeline: an unset or missing `upload_dir`
/// aborts the upload before any rule runs.
pub async fn create_storage(config: &UploadConfig) -> Result<Arc<dyn Storage>, UploadError> {
    let dir = config
        .upload_dir()
        .ok_or(UploadError::UploadDirNotConfigured)?;

    let storage = LocalStorage::open(dir).await?;
    Ok(Arc::new(storage))
}
