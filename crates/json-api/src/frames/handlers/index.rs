//! List Frames Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    frames::{errors::into_status_error, models::FrameResponse},
    state::State,
};

/// List Frames Handler
///
/// The whole catalog. Anonymous callers may browse it.
#[endpoint(
    tags("frames"),
    summary = "List Frames",
    responses(
        (status_code = StatusCode::OK, description = "Frames with their variants"),
        (status_code = StatusCode::FORBIDDEN, description = "Account is blocked"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<FrameResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let frames = state
        .app
        .frames
        .list_frames(depot.principal())
        .await
        .map_err(into_status_error)?;

    Ok(Json(frames.into_iter().map(FrameResponse::from).collect()))
}
