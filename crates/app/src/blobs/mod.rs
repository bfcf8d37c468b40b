//! Blob storage for uploaded images.
//!
//! Every stored image is owned by exactly one record field, so replacing or
//! removing that record deletes the blob outright.

mod errors;
mod local;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

pub use errors::BlobStoreError;
pub use local::LocalBlobStore;

/// An image received from a client, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-supplied file name, used as a hint for the stored name.
    pub filename: String,

    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

#[automock]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `directory`, returning the path the blob was stored at.
    ///
    /// The stored name is derived from `filename` but made unique, so two saves
    /// never overwrite each other.
    async fn save(
        &self,
        directory: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobStoreError>;

    /// Read a stored blob back.
    async fn load(&self, path: &str) -> Result<Vec<u8>, BlobStoreError>;

    /// Delete a stored blob. Deleting a path that does not exist succeeds.
    async fn delete(&self, path: &str) -> Result<(), BlobStoreError>;
}

/// Store an upload under `directory`.
pub(crate) async fn store(
    blobs: &dyn BlobStore,
    directory: &str,
    upload: ImageUpload,
) -> Result<String, BlobStoreError> {
    blobs.save(directory, &upload.filename, upload.bytes).await
}

/// Delete every blob in `paths`.
///
/// Runs after the owning rows are gone, so a failed delete is logged rather than
/// surfaced: the request itself has already succeeded.
pub(crate) async fn release<I>(blobs: &dyn BlobStore, paths: I)
where
    I: IntoIterator<Item = String>,
{
    for path in paths {
        if let Err(source) = blobs.delete(&path).await {
            warn!(blob_path = %path, "failed to release blob: {source}");
        }
    }
}
