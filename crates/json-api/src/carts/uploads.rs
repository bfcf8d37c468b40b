//! Cart Image Upload Handlers
//!
//! Store a picture ahead of composing a cart item. The returned path can then
//! be given as `{ "path": ... }` in place of inline image data.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use frameshop_app::blobs::ImageUpload;

use crate::{carts::errors::into_status_error, extensions::*, requests::ImageRequest, state::State};

/// Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadResponse {
    /// Stored path under the caller's directory, e.g. `cart/original/{user}/0190...-photo.jpg`
    pub path: String,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Original,
    Cropped,
}

async fn upload(
    target: Target,
    image: ImageRequest,
    depot: &Depot,
    res: &mut Response,
) -> Result<Json<UploadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let upload: ImageUpload = image.decode("image")?;
    let carts = &state.app.carts;

    let path = match target {
        Target::Original => carts.upload_original_image(depot.principal(), upload).await,
        Target::Cropped => carts.upload_cropped_image(depot.principal(), upload).await,
    }
    .map_err(into_status_error)?;

    tracing::info!(blob_path = %path, "stored cart image");

    res.status_code(StatusCode::CREATED);

    Ok(Json(UploadResponse { path }))
}

/// Upload Original Image
#[endpoint(
    tags("cart"),
    summary = "Upload Original Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn original(
    json: JsonBody<ImageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UploadResponse>, StatusError> {
    upload(Target::Original, json.into_inner(), depot, res).await
}

/// Upload Cropped Image
#[endpoint(
    tags("cart"),
    summary = "Upload Cropped Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn cropped(
    json: JsonBody<ImageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UploadResponse>, StatusError> {
    upload(Target::Cropped, json.into_inner(), depot, res).await
}
