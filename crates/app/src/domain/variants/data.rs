//! Variant Data

use rust_decimal::Decimal;

use crate::{
    blobs::ImageUpload,
    domain::{
        frames::records::{FrameUuid, InnerDimensions},
        variants::records::{VariantKind, VariantUuid},
    },
    patch::Patch,
};

/// One entry of a bulk variant submission.
///
/// The kind arrives as text so that an unknown kind fails only its own entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSubmission {
    pub kind: String,
    pub name: String,
    pub price: Decimal,
    pub image: Option<ImageUpload>,
    pub dimensions: Option<InnerDimensions>,
}

/// New Variant Data, validated and ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub frame_uuid: FrameUuid,
    pub kind: VariantKind,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub dimensions: Option<InnerDimensions>,
}

/// Variant Update Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Patch<ImageUpload>,
    pub dimensions: Option<InnerDimensions>,
}
