//! Create Frame Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::frames::{data::NewFrame, records::FrameUuid};

use crate::{
    extensions::*,
    frames::{errors::into_status_error, models::FrameResponse},
    requests::{DimensionsBody, ImageRequest, parse_amount},
    state::State,
};

/// Create Frame Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateFrameRequest {
    /// Client-chosen identifier; generated when omitted
    pub uuid: Option<Uuid>,
    pub name: String,
    /// Base price as a decimal string
    pub price: String,
    pub image: ImageRequest,
    pub dimensions: DimensionsBody,
}

impl CreateFrameRequest {
    fn into_new_frame(self) -> Result<NewFrame, StatusError> {
        Ok(NewFrame {
            uuid: self.uuid.map_or_else(FrameUuid::new, FrameUuid::from_uuid),
            price: parse_amount("price", &self.price)?,
            image: self.image.decode("image")?,
            name: self.name,
            dimensions: self.dimensions.into(),
        })
    }
}

/// Create Frame Handler
#[endpoint(
    tags("frames"),
    summary = "Create Frame",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Frame created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::CONFLICT, description = "Frame already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "frames.create",
    skip(json, depot, res),
    fields(frame_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateFrameRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FrameResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let frame = json.into_inner().into_new_frame()?;

    tracing::Span::current().record("frame_uuid", tracing::field::display(frame.uuid));

    let details = state
        .app
        .frames
        .create_frame(depot.principal(), frame)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/frames/{}", details.frame.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(details.into()))
}
