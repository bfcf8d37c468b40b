//! Delete Variant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, parse_kind},
};

/// Delete Variant Handler
///
/// Cart items that selected the variant keep their other selections.
#[endpoint(
    tags("variants"),
    summary = "Delete Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Variant deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown variant kind"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    kind: PathParam<String>,
    variant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = parse_kind(&kind.into_inner())?;
    let variant = variant.into_inner();

    state
        .app
        .variants
        .delete_variant(depot.principal(), kind, variant.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(variant_uuid = %variant, %kind, "deleted variant");

    Ok(StatusCode::NO_CONTENT)
}
