//! Variant Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::frames::records::{FrameUuid, InnerDimensions},
    uuids::TypedUuid,
};

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// The four independent option dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantKind {
    Color,
    Size,
    Finish,
    Hanging,
}

impl VariantKind {
    pub const ALL: [Self; 4] = [Self::Color, Self::Size, Self::Finish, Self::Hanging];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Size => "size",
            Self::Finish => "finish",
            Self::Hanging => "hanging",
        }
    }

    /// Name of the cart item field that holds a variant of this kind.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Color => "color_variant",
            Self::Size => "size_variant",
            Self::Finish => "finish_variant",
            Self::Hanging => "hanging_variant",
        }
    }

    /// Blob directory for variant images of this kind.
    #[must_use]
    pub const fn image_directory(self) -> &'static str {
        match self {
            Self::Color => "frame_variants/colors",
            Self::Size => "frame_variants/sizes",
            Self::Finish => "frame_variants/finishes",
            Self::Hanging => "frame_variants/hangings",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant kind: {0}")]
pub struct UnknownVariantKind(pub String);

impl FromStr for VariantKind {
    type Err = UnknownVariantKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "color" => Ok(Self::Color),
            "size" => Ok(Self::Size),
            "finish" => Ok(Self::Finish),
            "hanging" => Ok(Self::Hanging),
            other => Err(UnknownVariantKind(other.to_string())),
        }
    }
}

/// Variant Record
///
/// Only size variants carry inner dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub frame_uuid: FrameUuid,
    pub kind: VariantKind,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub dimensions: Option<InnerDimensions>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
