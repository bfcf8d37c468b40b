//! Carts service errors.

use std::fmt;

use thiserror::Error;

use crate::{
    blobs::BlobStoreError,
    database::StoreError,
    domain::{
        carts::data::MissingRequiredImage,
        catalog::VariantLookupError,
        pricing::{AmountTooLarge, VariantMismatch},
        principals::access::AccessError,
        variants::records::VariantKind,
    },
};

/// What a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    CartItem,
    Frame,
    Variant(VariantKind),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CartItem => f.write_str("cart item"),
            Self::Frame => f.write_str("frame"),
            Self::Variant(kind) => f.write_str(kind.field_name()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("{0} not found")]
    NotFound(Missing),

    #[error(transparent)]
    VariantMismatch(#[from] VariantMismatch),

    #[error("line total too large: {0}")]
    TotalTooLarge(#[from] AmountTooLarge),

    #[error(transparent)]
    MissingRequiredImage(#[from] MissingRequiredImage),

    #[error("image path {0} cannot be used for this item")]
    InvalidImagePath(String),

    #[error("transform values must be finite with a positive scale")]
    InvalidTransform,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("image storage error")]
    Blob(#[from] BlobStoreError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl CartsServiceError {
    /// Classify a storage error raised while loading `missing`.
    pub(crate) fn lookup(missing: Missing) -> impl FnOnce(StoreError) -> Self {
        move |error| match error {
            StoreError::NotFound => Self::NotFound(missing),
            other => Self::Store(other),
        }
    }
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

impl From<VariantLookupError> for CartsServiceError {
    fn from(error: VariantLookupError) -> Self {
        Self::lookup(Missing::Variant(error.kind))(error.source)
    }
}
