//! Filesystem storage for uploaded product images.
//!
//! Files live flat under a configurable root directory and are addressed
//! by a generated filename (UUID plus a sanitized extension). Deleting a
//! filename that no longer exists is not an error; deletion happens
//! inline with the document update that displaced the file, and a crash
//! between the two leaves an orphaned file (accepted gap, no
//! compensation).

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Longest extension carried over from an uploaded filename.
const MAX_EXTENSION_LENGTH: usize = 8;

/// Errors that can occur while storing or deleting image files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A filename that is not a bare name this store generated.
    #[error("invalid image filename")]
    InvalidFilename,
}

/// An uploaded image waiting to be stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename as sent by the client; only its extension is kept.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Store for product image files.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// by [`ImageStore::ensure_root`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory the files live under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Persist an upload and return its generated filename.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be written.
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, StorageError> {
        self.ensure_root().await?;

        let filename = match sanitized_extension(&upload.file_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(self.root.join(&filename), &upload.bytes).await?;

        Ok(filename)
    }

    /// Delete a stored file. A missing file is treated as already deleted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidFilename` if `filename` is not a bare
    /// name (path separators or parent references), and `StorageError::Io`
    /// for any filesystem failure other than the file being absent.
    pub async fn delete(&self, filename: &str) -> Result<(), StorageError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename.contains("..")
        {
            return Err(StorageError::InvalidFilename);
        }

        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether a stored file currently exists.
    pub async fn exists(&self, filename: &str) -> bool {
        tokio::fs::try_exists(self.root.join(filename))
            .await
            .unwrap_or(false)
    }
}

/// Lowercased alphanumeric extension of an uploaded filename, if it has
/// a usable one.
fn sanitized_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LENGTH
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    fn upload(file_name: &str) -> ImageUpload {
        ImageUpload {
            file_name: file_name.to_owned(),
            bytes: b"not-really-a-png".to_vec(),
        }
    }

    #[tokio::test]
    async fn save_keeps_sanitized_extension() {
        let (_dir, store) = store();

        let filename = store.save(&upload("photo.PNG")).await.unwrap();
        assert!(filename.ends_with(".png"));
        assert!(store.exists(&filename).await);
    }

    #[tokio::test]
    async fn save_drops_unusable_extension() {
        let (_dir, store) = store();

        let filename = store.save(&upload("weird.!!!")).await.unwrap();
        assert!(!filename.contains('.'));
        assert!(store.exists(&filename).await);
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let (_dir, store) = store();
        let filename = store.save(&upload("photo.jpg")).await.unwrap();

        store.delete(&filename).await.unwrap();
        assert!(!store.exists(&filename).await);

        // Second delete is a no-op, not an error.
        store.delete(&filename).await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_path_traversal() {
        let (_dir, store) = store();

        assert!(matches!(
            store.delete("../etc/passwd").await.unwrap_err(),
            StorageError::InvalidFilename
        ));
        assert!(matches!(
            store.delete("nested/file.png").await.unwrap_err(),
            StorageError::InvalidFilename
        ));
    }
}
