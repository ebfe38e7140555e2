//! Local-filesystem implementation of `UploadStore`.

use std::path::{Path, PathBuf};

use tracing::debug;

use menubot_core::storage::upload_store::UploadStore;
use menubot_types::error::UploadError;
use menubot_types::menu::StoredUpload;

/// Stores uploads as flat files under a single directory.
///
/// All operations go through `tokio::fs` for async I/O.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    dir: PathBuf,
}

impl LocalUploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{data_dir}/uploads`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("uploads"))
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UploadError::FileSystem(e.to_string()))
    }
}

impl UploadStore for LocalUploadStore {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<StoredUpload, UploadError> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(UploadError::FileSystem(format!(
                "refusing to store unsanitized filename '{filename}'"
            )));
        }

        self.ensure_dir().await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| UploadError::FileSystem(e.to_string()))?;

        debug!(path = %path.display(), bytes = data.len(), "Stored upload");
        Ok(StoredUpload {
            filename: filename.to_string(),
        })
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}
