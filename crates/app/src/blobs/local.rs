//! Filesystem-backed blob store.

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{BlobStore, BlobStoreError};

/// Stores blobs as files below a media root directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, BlobStoreError> {
        let relative = Path::new(path);

        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if path.is_empty() || !is_plain {
            return Err(BlobStoreError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(
        &self,
        directory: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError> {
        let stored = format!(
            "{}/{}-{}",
            directory.trim_end_matches('/'),
            Uuid::now_v7().simple(),
            sanitize_filename(filename)
        );

        let target = self.resolve(&stored)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&target, bytes).await?;

        debug!(blob_path = %stored, "stored blob");

        Ok(stored)
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, BlobStoreError> {
        let target = self.resolve(path)?;

        match fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(path.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), BlobStoreError> {
        let target = self.resolve(path)?;

        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(blob_path = %path, "deleted blob");

                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Keep only characters that are safe in a single path segment.
fn sanitize_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
