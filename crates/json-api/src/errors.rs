//! Status mapping shared by every resource.

use std::fmt::Display;

use salvo::http::StatusError;
use tracing::error;

use frameshop_app::{blobs::BlobStoreError, domain::principals::access::AccessError};

pub(crate) fn access_error(error: AccessError) -> StatusError {
    match error {
        AccessError::Unauthorized => StatusError::unauthorized().brief("Authentication required"),
        AccessError::Blocked => StatusError::forbidden().brief("Account is blocked"),
        AccessError::Forbidden => StatusError::forbidden().brief("Insufficient privileges"),
    }
}

pub(crate) fn blob_error(context: &str, error: &BlobStoreError) -> StatusError {
    error!("{context}: {error}");

    StatusError::internal_server_error()
}

pub(crate) fn store_error(context: &str, error: impl Display) -> StatusError {
    error!("{context}: {error}");

    StatusError::internal_server_error()
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn access_errors_map_to_auth_statuses() {
        assert_eq!(
            access_error(AccessError::Unauthorized).code,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(access_error(AccessError::Blocked).code, StatusCode::FORBIDDEN);
        assert_eq!(access_error(AccessError::Forbidden).code, StatusCode::FORBIDDEN);
    }
}
