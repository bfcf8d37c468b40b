//! Frame Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        principals::records::PrincipalUuid,
        variants::records::{VariantKind, VariantRecord},
    },
    uuids::TypedUuid,
};

/// Frame UUID
pub type FrameUuid = TypedUuid<FrameRecord>;

/// Nominal inner opening of a frame, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerDimensions {
    pub width: f64,
    pub height: f64,
}

impl InnerDimensions {
    /// Both sides must be finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Frame Record
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub uuid: FrameUuid,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub dimensions: InnerDimensions,
    pub created_by: Option<PrincipalUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A frame with its variants grouped by kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDetails {
    pub frame: FrameRecord,
    pub color_variants: Vec<VariantRecord>,
    pub size_variants: Vec<VariantRecord>,
    pub finish_variants: Vec<VariantRecord>,
    pub hanging_variants: Vec<VariantRecord>,
}

impl FrameDetails {
    /// Group `variants` under `frame`, ignoring variants owned by other frames.
    #[must_use]
    pub fn new(frame: FrameRecord, variants: impl IntoIterator<Item = VariantRecord>) -> Self {
        let mut details = Self {
            frame,
            color_variants: Vec::new(),
            size_variants: Vec::new(),
            finish_variants: Vec::new(),
            hanging_variants: Vec::new(),
        };

        for variant in variants {
            if variant.frame_uuid != details.frame.uuid {
                continue;
            }

            match variant.kind {
                VariantKind::Color => details.color_variants.push(variant),
                VariantKind::Size => details.size_variants.push(variant),
                VariantKind::Finish => details.finish_variants.push(variant),
                VariantKind::Hanging => details.hanging_variants.push(variant),
            }
        }

        details
    }

    #[must_use]
    pub fn variants(&self, kind: VariantKind) -> &[VariantRecord] {
        match kind {
            VariantKind::Color => &self.color_variants,
            VariantKind::Size => &self.size_variants,
            VariantKind::Finish => &self.finish_variants,
            VariantKind::Hanging => &self.hanging_variants,
        }
    }
}
