//! Frame Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::{frames::records::FrameDetails, variants::records::VariantRecord};

use crate::{
    requests::{DimensionsBody, format_amount},
    variants::models::VariantResponse,
};

/// Frame Response
///
/// The frame with every variant it offers, grouped by kind.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FrameResponse {
    pub uuid: Uuid,
    pub name: String,
    /// Base price, e.g. `"24.00"`
    pub price: String,
    pub image: String,
    pub dimensions: DimensionsBody,
    pub created_by: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
    pub color_variants: Vec<VariantResponse>,
    pub size_variants: Vec<VariantResponse>,
    pub finish_variants: Vec<VariantResponse>,
    pub hanging_variants: Vec<VariantResponse>,
}

fn responses(variants: Vec<VariantRecord>) -> Vec<VariantResponse> {
    variants.into_iter().map(VariantResponse::from).collect()
}

impl From<FrameDetails> for FrameResponse {
    fn from(details: FrameDetails) -> Self {
        let frame = details.frame;

        Self {
            uuid: frame.uuid.into_uuid(),
            name: frame.name,
            price: format_amount(frame.price),
            image: frame.image,
            dimensions: frame.dimensions.into(),
            created_by: frame.created_by.map(|uuid| uuid.into_uuid()),
            created_at: frame.created_at.to_string(),
            updated_at: frame.updated_at.to_string(),
            color_variants: responses(details.color_variants),
            size_variants: responses(details.size_variants),
            finish_variants: responses(details.finish_variants),
            hanging_variants: responses(details.hanging_variants),
        }
    }
}
