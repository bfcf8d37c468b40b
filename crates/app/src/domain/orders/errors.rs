//! Orders service errors.

use thiserror::Error;

use crate::{
    blobs::BlobStoreError,
    database::StoreError,
    domain::{
        carts::records::CartItemUuid,
        catalog::VariantLookupError,
        orders::records::OrderStatus,
        pricing::{AmountTooLarge, VariantMismatch},
        principals::access::AccessError,
    },
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("cart item {0} has no adjusted image")]
    MissingImage(CartItemUuid),

    #[error("cannot move an order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order total too large: {0}")]
    TotalTooLarge(#[from] AmountTooLarge),

    #[error(transparent)]
    VariantMismatch(#[from] VariantMismatch),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("image storage error")]
    Blob(#[from] BlobStoreError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<VariantLookupError> for OrdersServiceError {
    fn from(error: VariantLookupError) -> Self {
        Self::Store(error.source)
    }
}
