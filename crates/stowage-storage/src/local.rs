use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Open an existing upload directory
    ///
    /// Unlike a media library, the upload directory is never created on demand: a
    /// missing directory is a deployment problem and is reported as such.
    pub async fn open(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        let is_dir = fs::metadata(&base_path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(StorageError::DirectoryMissing(base_path));
        }

        Ok(LocalStorage { base_path })
    }

    /// Convert a file name to a path inside the upload directory
    ///
    /// Names are flat; anything that could address another directory is rejected.
    fn key_to_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        if file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains(['/', '\\', '\0'])
        {
            return Err(StorageError::InvalidKey(file_name.to_string()));
        }

        Ok(self.base_path.join(file_name))
    }

    /// Rename, falling back to copy + remove when the source is on another device
    async fn move_file(&self, from: &Path, to: &Path) -> StorageResult<()> {
        let rename_err = match fs::rename(from, to).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        tracing::debug!(
            from = %from.display(),
            to = %to.display(),
            error = %rename_err,
            "Rename failed, falling back to copy"
        );

        self.copy_into(from, to).await?;

        if let Err(e) = fs::remove_file(from).await {
            tracing::warn!(
                path = %from.display(),
                error = %e,
                "Stored upload but failed to remove temporary file"
            );
        }

        Ok(())
    }

    /// Copy through a staging file in the upload directory, then rename it over `to`.
    ///
    /// `to` is either replaced whole or left untouched; a partial copy is removed when
    /// the staging path drops.
    async fn copy_into(&self, from: &Path, to: &Path) -> StorageResult<()> {
        let staging = tempfile::Builder::new()
            .prefix(".stowage-")
            .tempfile_in(&self.base_path)?
            .into_temp_path();

        fs::copy(from, &staging).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;

        staging.persist(to).map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to move staged copy into {}: {}",
                to.display(),
                e.error
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, source: &Path, file_name: &str) -> StorageResult<PathBuf> {
        let path = self.key_to_path(file_name)?;
        let start = std::time::Instant::now();

        self.move_file(source, &path).await?;

        tracing::info!(
            path = %path.display(),
            source = %source.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage store successful"
        );

        Ok(path)
    }

    async fn exists(&self, file_name: &str) -> StorageResult<bool> {
        let path = self.key_to_path(file_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, file_name: &str) -> StorageResult<()> {
        let path = self.key_to_path(file_name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Local storage delete successful");

        Ok(())
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn staged(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, data).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_open_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = LocalStorage::open(&missing).await;
        assert!(matches!(result, Err(StorageError::DirectoryMissing(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_open_rejects_regular_file() {
        let dir = tempdir().unwrap();
        let file = staged(dir.path(), "plain.txt", b"x").await;

        let result = LocalStorage::open(&file).await;
        assert!(matches!(result, Err(StorageError::DirectoryMissing(_))));
    }

    #[tokio::test]
    async fn test_store_moves_file() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        let source = staged(tmp.path(), "upload-1234", b"test data").await;
        let path = storage.store(&source, "test.txt").await.unwrap();

        assert_eq!(path, uploads.path().join("test.txt"));
        assert_eq!(fs::read(&path).await.unwrap(), b"test data");
        assert!(!fs::try_exists(&source).await.unwrap());
        assert!(storage.exists("test.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_store_overwrites_existing() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        staged(uploads.path(), "a.txt", b"old").await;
        let source = staged(tmp.path(), "upload-5678", b"new").await;

        let path = storage.store(&source, "a.txt").await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_store_missing_source_fails() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        let result = storage.store(&tmp.path().join("gone"), "x.txt").await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
        assert!(!storage.exists("x.txt").await.unwrap());
    }

    async fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_copy_fallback_replaces_target_whole() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        staged(uploads.path(), "a.txt", b"old").await;
        let source = staged(tmp.path(), "upload-4321", b"new contents").await;

        storage
            .copy_into(&source, &uploads.path().join("a.txt"))
            .await
            .unwrap();
        assert_eq!(fs::read(uploads.path().join("a.txt")).await.unwrap(), b"new contents");
        assert_eq!(dir_entries(uploads.path()).await, vec!["a.txt"]);
    }

    #[tokio::test]
    async fn test_failed_copy_keeps_existing_target() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        staged(uploads.path(), "a.txt", b"old").await;

        let result = storage
            .copy_into(&tmp.path().join("gone"), &uploads.path().join("a.txt"))
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));

        // Old contents intact and no staging file left behind
        assert_eq!(fs::read(uploads.path().join("a.txt")).await.unwrap(), b"old");
        assert_eq!(dir_entries(uploads.path()).await, vec!["a.txt"]);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let tmp = tempdir().unwrap();
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();
        let source = staged(tmp.path(), "upload-9", b"x").await;

        for name in ["../escape.txt", "..", "sub/dir.txt", "back\\slash", ""] {
            let result = storage.store(&source, name).await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "{name:?} should be rejected"
            );
        }
        // Dots inside a name are fine
        assert!(storage.store(&source, "my..file.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let uploads = tempdir().unwrap();
        let storage = LocalStorage::open(uploads.path()).await.unwrap();

        staged(uploads.path(), "old.txt", b"x").await;
        storage.delete("old.txt").await.unwrap();
        assert!(!storage.exists("old.txt").await.unwrap());

        // Missing files are not an error
        assert!(storage.delete("nonexistent.txt").await.is_ok());
    }
}
