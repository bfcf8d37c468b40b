//! Principals service errors.

use thiserror::Error;

use crate::{database::StoreError, domain::principals::access::AccessError};

#[derive(Debug, Error)]
pub enum PrincipalsServiceError {
    #[error("principal already exists")]
    AlreadyExists,

    #[error("principal not found")]
    NotFound,

    #[error("invalid principal data")]
    InvalidData,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for PrincipalsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::InvalidData | StoreError::InvalidReference => Self::InvalidData,
            StoreError::Sql(_) => Self::Store(error),
        }
    }
}
