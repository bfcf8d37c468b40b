//! Auth service errors.

use thiserror::Error;

use crate::{auth::token::ApiTokenError, database::StoreError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, malformed, revoked or expired token.
    #[error("token not found")]
    NotFound,

    #[error("principal not found")]
    PrincipalNotFound,

    #[error("principal is blocked")]
    Blocked,

    #[error("token processing error")]
    Token(#[from] ApiTokenError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AuthServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InvalidReference => Self::PrincipalNotFound,
            other => Self::Store(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid registration data")]
    InvalidData,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for RegistrationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::UsernameTaken,
            StoreError::InvalidData => Self::InvalidData,
            other => Self::Store(other),
        }
    }
}
