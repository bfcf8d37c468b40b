//! Principal Errors

use salvo::http::StatusError;

use frameshop_app::{auth::RegistrationError, domain::principals::PrincipalsServiceError};

use crate::errors::{access_error, store_error};

pub(crate) fn into_status_error(error: PrincipalsServiceError) -> StatusError {
    match error {
        PrincipalsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username or email already in use")
        }
        PrincipalsServiceError::NotFound => StatusError::not_found().brief("User not found"),
        PrincipalsServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        PrincipalsServiceError::Access(source) => access_error(source),
        PrincipalsServiceError::Store(source) => store_error("principal storage failed", source),
    }
}

pub(crate) fn registration_error(error: RegistrationError) -> StatusError {
    match error {
        RegistrationError::UsernameTaken => StatusError::conflict().brief("Username already taken"),
        RegistrationError::InvalidData => {
            StatusError::bad_request().brief("Username and email are required")
        }
        RegistrationError::Store(source) => store_error("registration failed", source),
    }
}
