//! Create Variants Handler

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

use frameshop_app::domain::variants::{VariantBatch, data::VariantSubmission};

use crate::{
    extensions::*,
    requests::{DimensionsBody, ImageRequest, parse_amount},
    state::State,
    variants::{errors::into_status_error, models::VariantResponse},
};

/// One variant of a bulk submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantRequest {
    /// One of `color`, `size`, `finish` or `hanging`
    pub kind: String,
    pub name: String,
    pub price: String,
    pub image: Option<ImageRequest>,
    /// Required for size variants
    pub dimensions: Option<DimensionsBody>,
}

impl VariantRequest {
    fn into_submission(self, index: usize) -> Result<VariantSubmission, StatusError> {
        let field = format!("variants[{index}]");

        Ok(VariantSubmission {
            price: parse_amount(&format!("{field}.price"), &self.price)?,
            image: self
                .image
                .map(|image| image.decode(&format!("{field}.image")))
                .transpose()?,
            kind: self.kind,
            name: self.name,
            dimensions: self.dimensions.map(Into::into),
        })
    }
}

/// Create Variants Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantsRequest {
    pub variants: Vec<VariantRequest>,
}

/// A submitted variant that was not created
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectedVariantResponse {
    /// Position in the submitted list
    pub index: usize,
    pub error: String,
}

/// Create Variants Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantBatchResponse {
    pub created: Vec<VariantResponse>,
    pub rejected: Vec<RejectedVariantResponse>,
}

impl From<VariantBatch> for VariantBatchResponse {
    fn from(batch: VariantBatch) -> Self {
        Self {
            created: batch.created.into_iter().map(VariantResponse::from).collect(),
            rejected: batch
                .rejected
                .into_iter()
                .map(|rejected| RejectedVariantResponse {
                    index: rejected.index,
                    error: rejected.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Create Variants Handler
///
/// Valid entries are created even when others fail. A partial rejection
/// answers 422 and lists both outcomes.
#[endpoint(
    tags("variants"),
    summary = "Create Frame Variants",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Every variant created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Some variants rejected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "variants.create", skip(frame, json, depot, res), err)]
pub(crate) async fn handler(
    frame: PathParam<Uuid>,
    json: JsonBody<CreateVariantsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantBatchResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let submissions = json
        .into_inner()
        .variants
        .into_iter()
        .enumerate()
        .map(|(index, request)| request.into_submission(index))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = state
        .app
        .variants
        .create_variants(depot.principal(), frame.into_inner().into(), submissions)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        created = batch.created.len(),
        rejected = batch.rejected.len(),
        "created variants"
    );

    res.status_code(if batch.is_complete() {
        StatusCode::CREATED
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    });

    Ok(Json(batch.into()))
}
