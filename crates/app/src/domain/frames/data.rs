//! Frame Data

use rust_decimal::Decimal;

use crate::{
    blobs::ImageUpload,
    domain::{
        frames::records::{FrameUuid, InnerDimensions},
        principals::records::PrincipalUuid,
    },
};

/// New Frame Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewFrame {
    pub uuid: FrameUuid,
    pub name: String,
    pub price: Decimal,
    pub image: ImageUpload,
    pub dimensions: InnerDimensions,
}

/// Frame Update Data
///
/// The image can be replaced but never removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<ImageUpload>,
    pub dimensions: Option<InnerDimensions>,
}

/// A frame whose image is already stored, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFrameRecord {
    pub uuid: FrameUuid,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub dimensions: InnerDimensions,
    pub created_by: Option<PrincipalUuid>,
}
