//! Variants

mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;

use salvo::http::StatusError;

use frameshop_app::domain::variants::records::VariantKind;

/// Parse the `{kind}` path segment.
pub(crate) fn parse_kind(kind: &str) -> Result<VariantKind, StatusError> {
    kind.parse::<VariantKind>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))
}
