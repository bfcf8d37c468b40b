//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_status_error, items::requests::UpdateCartItemRequest,
        models::CartItemResponse,
    },
    extensions::*,
    state::State,
};

/// Update Cart Item Handler
///
/// The total is recomputed and every selection re-checked against the
/// resulting frame, whichever fields change.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Variant mismatch or invalid payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Item, frame or variant not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "cart_items.update", skip(item, json, depot), err)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let patch = json.into_inner().into_patch()?;

    let item = state
        .app
        .carts
        .update_item(depot.principal(), item.into_inner().into(), patch)
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_item_uuid = %item.uuid, total_price = %item.total_price, "updated cart item");

    Ok(Json(item.into()))
}
