//! Get Frame Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    frames::{errors::into_status_error, models::FrameResponse},
    state::State,
};

/// Get Frame Handler
#[endpoint(
    tags("frames"),
    summary = "Get Frame",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Frame with its variants"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    frame: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<FrameResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .frames
        .get_frame(depot.principal(), frame.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
