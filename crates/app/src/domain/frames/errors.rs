//! Frames service errors.

use thiserror::Error;

use crate::{
    blobs::BlobStoreError,
    database::StoreError,
    domain::{pricing::InvalidPrice, principals::access::AccessError},
};

#[derive(Debug, Error)]
pub enum FramesServiceError {
    #[error("frame not found")]
    NotFound,

    #[error("frame already exists")]
    AlreadyExists,

    #[error("invalid frame data")]
    InvalidData,

    #[error(transparent)]
    InvalidPrice(#[from] InvalidPrice),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("image storage error")]
    Blob(#[from] BlobStoreError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for FramesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::InvalidData | StoreError::InvalidReference => Self::InvalidData,
            StoreError::Sql(_) => Self::Store(error),
        }
    }
}
