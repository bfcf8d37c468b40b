//! Variants service errors.

use thiserror::Error;

use crate::{
    blobs::BlobStoreError,
    database::StoreError,
    domain::{
        pricing::InvalidPrice, principals::access::AccessError,
        variants::records::{UnknownVariantKind, VariantKind},
    },
};

#[derive(Debug, Error)]
pub enum VariantsServiceError {
    #[error("variant not found")]
    NotFound,

    #[error("frame not found")]
    FrameNotFound,

    #[error("{kind} variant '{name}' already exists for this frame")]
    DuplicateVariantName { kind: VariantKind, name: String },

    #[error("size variants need positive inner dimensions")]
    InvalidDimensions,

    #[error("variant name must not be empty")]
    EmptyName,

    #[error(transparent)]
    InvalidPrice(#[from] InvalidPrice),

    #[error(transparent)]
    UnknownKind(#[from] UnknownVariantKind),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("image storage error")]
    Blob(#[from] BlobStoreError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for VariantsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidReference => Self::FrameNotFound,
            StoreError::AlreadyExists | StoreError::InvalidData | StoreError::Sql(_) => {
                Self::Store(error)
            }
        }
    }
}
