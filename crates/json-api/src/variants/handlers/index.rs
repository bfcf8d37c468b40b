//! List Variants Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, models::VariantResponse, parse_kind},
};

/// List Variants Handler
///
/// Variants of one kind offered by a frame.
#[endpoint(
    tags("variants"),
    summary = "List Frame Variants",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variants of the requested kind"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown variant kind"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    frame: PathParam<Uuid>,
    kind: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<VariantResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = parse_kind(&kind.into_inner())?;

    let variants = state
        .app
        .variants
        .list_variants(depot.principal(), frame.into_inner().into(), kind)
        .await
        .map_err(into_status_error)?;

    Ok(Json(variants.into_iter().map(VariantResponse::from).collect()))
}
