//! Cart Errors

use salvo::http::StatusError;

use frameshop_app::domain::carts::CartsServiceError;

use crate::errors::{access_error, blob_error, store_error};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound(missing) => {
            StatusError::not_found().brief(format!("{missing} not found"))
        }
        CartsServiceError::VariantMismatch(_)
        | CartsServiceError::MissingRequiredImage(_)
        | CartsServiceError::InvalidImagePath(_)
        | CartsServiceError::TotalTooLarge(_)
        | CartsServiceError::InvalidTransform => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::Access(source) => access_error(source),
        CartsServiceError::Blob(source) => blob_error("failed to store cart image", &source),
        CartsServiceError::Store(source) => store_error("cart storage failed", source),
    }
}
