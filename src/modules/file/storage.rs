use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::api::error;

/// Disk store for uploaded blobs. Every payload lands directly under the
/// storage root with a fresh UUID-based name; metadata records keep the
/// absolute path returned by `write`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create the storage root if needed and pin its absolute path.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, error::SystemError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        let root = std::path::absolute(&root)?;

        Ok(Self { root })
    }

    #[allow(unused)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a payload under a generated name and return its absolute
    /// location. A generated-name collision overwrites.
    pub async fn write(
        &self,
        bytes: &[u8],
        declared_name: &str,
    ) -> Result<String, error::SystemError> {
        let stored_name = Self::generate_stored_name(declared_name);
        let target = self.root.join(&stored_name);
        tokio::fs::write(&target, bytes).await?;

        Ok(target.to_string_lossy().into_owned())
    }

    pub async fn read(&self, location: &str) -> Result<Vec<u8>, error::SystemError> {
        match tokio::fs::read(location).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(error::SystemError::not_found("File content not found"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove stored bytes. Deletion is idempotent: missing content is not
    /// an error. Returns whether anything was removed.
    pub async fn remove(&self, location: &str) -> Result<bool, error::SystemError> {
        match tokio::fs::remove_file(location).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// UUID plus the declared name's extension; no extension, no dot.
    fn generate_stored_name(declared_name: &str) -> String {
        let extension =
            Path::new(declared_name).extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let uuid = Uuid::now_v7();
        if extension.is_empty() {
            uuid.to_string()
        } else {
            format!("{}.{}", uuid, extension)
        }
    }
}
