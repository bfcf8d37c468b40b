//! Update Variant Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::variants::data::VariantUpdate;

use crate::{
    extensions::*,
    requests::{DimensionsBody, ImageRequest, double_option, parse_amount},
    state::State,
    variants::{errors::into_status_error, models::VariantResponse, parse_kind},
};

/// Update Variant Request
///
/// Omitted fields keep their value. `"image": null` removes the image.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateVariantRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<ImageRequest>>,
    pub dimensions: Option<DimensionsBody>,
}

impl UpdateVariantRequest {
    fn into_update(self) -> Result<VariantUpdate, StatusError> {
        let image = match self.image {
            Some(Some(image)) => Some(Some(image.decode("image")?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(VariantUpdate {
            name: self.name,
            price: self
                .price
                .map(|price| parse_amount("price", &price))
                .transpose()?,
            image: image.into(),
            dimensions: self.dimensions.map(Into::into),
        })
    }
}

/// Update Variant Handler
#[endpoint(
    tags("variants"),
    summary = "Update Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variant updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Name already used for this frame"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "variants.update", skip(kind, variant, json, depot), err)]
pub(crate) async fn handler(
    kind: PathParam<String>,
    variant: PathParam<Uuid>,
    json: JsonBody<UpdateVariantRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = parse_kind(&kind.into_inner())?;
    let update = json.into_inner().into_update()?;

    let variant = state
        .app
        .variants
        .update_variant(depot.principal(), kind, variant.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(variant_uuid = %variant.uuid, %kind, "updated variant");

    Ok(Json(variant.into()))
}
