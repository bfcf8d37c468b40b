//! Variant Errors

use salvo::http::StatusError;

use frameshop_app::domain::variants::VariantsServiceError;

use crate::errors::{access_error, blob_error, store_error};

pub(crate) fn into_status_error(error: VariantsServiceError) -> StatusError {
    match error {
        VariantsServiceError::NotFound => StatusError::not_found().brief("Variant not found"),
        VariantsServiceError::FrameNotFound => StatusError::not_found().brief("Frame not found"),
        VariantsServiceError::DuplicateVariantName { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        VariantsServiceError::InvalidDimensions
        | VariantsServiceError::EmptyName
        | VariantsServiceError::InvalidPrice(_)
        | VariantsServiceError::UnknownKind(_) => StatusError::bad_request().brief(error.to_string()),
        VariantsServiceError::Access(source) => access_error(source),
        VariantsServiceError::Blob(source) => blob_error("failed to store variant image", &source),
        VariantsServiceError::Store(source) => store_error("variant storage failed", source),
    }
}
