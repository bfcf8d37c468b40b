//! Variant Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::variants::records::VariantRecord;

use crate::requests::{DimensionsBody, format_amount};

/// Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub frame_uuid: Uuid,
    /// One of `color`, `size`, `finish` or `hanging`
    pub kind: String,
    pub name: String,
    /// Price added to the frame price, e.g. `"4.50"`
    pub price: String,
    pub image: Option<String>,
    /// Present on size variants only
    pub dimensions: Option<DimensionsBody>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            frame_uuid: variant.frame_uuid.into_uuid(),
            kind: variant.kind.as_str().to_string(),
            name: variant.name,
            price: format_amount(variant.price),
            image: variant.image,
            dimensions: variant.dimensions.map(DimensionsBody::from),
            created_at: variant.created_at.to_string(),
            updated_at: variant.updated_at.to_string(),
        }
    }
}
