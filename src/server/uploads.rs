use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::types::EditorError;

/// Scratch directory for uploaded files. Removed from disk when dropped.
///
/// Files are stored under their client-supplied names, so two uploads with
/// the same name overwrite each other (last write wins).
#[derive(Debug)]
pub struct UploadStore {
    dir: TempDir,
}

impl UploadStore {
    pub fn new() -> Result<Self, EditorError> {
        let dir = tempfile::Builder::new().prefix("wpgm-editor-").tempdir()?;
        debug!("upload scratch directory at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, EditorError> {
        let name = sanitize_file_name(file_name)
            .ok_or_else(|| EditorError::Upload(format!("invalid file name {file_name:?}")))?;
        let path = self.dir.path().join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// Strip any directory components a client may have sent.
pub fn sanitize_file_name(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}
