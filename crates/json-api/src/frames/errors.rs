//! Frame Errors

use salvo::http::StatusError;

use frameshop_app::domain::frames::FramesServiceError;

use crate::errors::{access_error, blob_error, store_error};

pub(crate) fn into_status_error(error: FramesServiceError) -> StatusError {
    match error {
        FramesServiceError::NotFound => StatusError::not_found().brief("Frame not found"),
        FramesServiceError::AlreadyExists => StatusError::conflict().brief("Frame already exists"),
        FramesServiceError::InvalidData => StatusError::bad_request().brief("Invalid frame payload"),
        FramesServiceError::InvalidPrice(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        FramesServiceError::Access(source) => access_error(source),
        FramesServiceError::Blob(source) => blob_error("failed to store frame image", &source),
        FramesServiceError::Store(source) => store_error("frame storage failed", source),
    }
}
