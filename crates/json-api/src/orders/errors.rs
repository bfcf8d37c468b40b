//! Order Errors

use salvo::http::StatusError;

use frameshop_app::domain::orders::OrdersServiceError;

use crate::errors::{access_error, blob_error, store_error};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::MissingImage(_)
        | OrdersServiceError::TotalTooLarge(_)
        | OrdersServiceError::VariantMismatch(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Access(source) => access_error(source),
        OrdersServiceError::Blob(source) => blob_error("failed to copy order image", &source),
        OrdersServiceError::Store(source) => store_error("order storage failed", source),
    }
}
