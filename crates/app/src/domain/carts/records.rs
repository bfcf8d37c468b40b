//! Cart Records

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        frames::records::FrameUuid,
        pricing::Quantity,
        principals::records::PrincipalUuid,
        variants::records::{VariantKind, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub principal_uuid: PrincipalUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart with its items in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub cart: CartRecord,
    pub items: Vec<CartItemRecord>,
    pub subtotal: Decimal,
}

impl Cart {
    #[must_use]
    pub fn new(cart: CartRecord, items: Vec<CartItemRecord>) -> Self {
        let mut subtotal = items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum + item.total_price);

        subtotal.rescale(2);

        Self {
            cart,
            items,
            subtotal,
        }
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Selected variant per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantChoices {
    pub color: Option<VariantUuid>,
    pub size: Option<VariantUuid>,
    pub finish: Option<VariantUuid>,
    pub hanging: Option<VariantUuid>,
}

impl VariantChoices {
    #[must_use]
    pub const fn get(&self, kind: VariantKind) -> Option<VariantUuid> {
        match kind {
            VariantKind::Color => self.color,
            VariantKind::Size => self.size,
            VariantKind::Finish => self.finish,
            VariantKind::Hanging => self.hanging,
        }
    }
}

/// The images a cart item can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    Original,
    Cropped,
    Adjusted,
}

impl ImageRole {
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Original => "original_image",
            Self::Cropped => "cropped_image",
            Self::Adjusted => "adjusted_image",
        }
    }

    /// Blob directory images of this role are stored under.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Original => "cart/original",
            Self::Cropped => "cart/cropped",
            Self::Adjusted => "cart/adjusted",
        }
    }

    /// Directory `principal`'s images of this role are stored under.
    #[must_use]
    pub fn directory_for(self, principal: PrincipalUuid) -> String {
        format!("{}/{principal}", self.directory())
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Stored image paths of a cart item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItemImages {
    pub original: Option<String>,
    pub cropped: Option<String>,
    pub adjusted: Option<String>,
}

impl CartItemImages {
    /// Every stored path, for release.
    #[must_use]
    pub fn into_paths(self) -> Vec<String> {
        [self.original, self.cropped, self.adjusted]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Client-side placement of the picture inside the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub frame_rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            frame_rotation: 0.0,
        }
    }
}

impl Transform {
    /// Every component must be finite and the scale positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.translate_x,
            self.translate_y,
            self.scale,
            self.rotation,
            self.frame_rotation,
        ]
        .iter()
        .all(|value| value.is_finite())
            && self.scale > 0.0
    }
}

/// Lifecycle state of a stored cart item.
///
/// Drafts are never stored and removed items no longer exist, so only the two
/// persisted states appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartItemState {
    /// Added with both required images.
    Committed,

    /// Modified at least once since it was added.
    Updated,
}

impl CartItemState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::Updated => "updated",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "committed" => Some(Self::Committed),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }
}

/// CartItem Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub frame_uuid: FrameUuid,
    pub variants: VariantChoices,
    pub quantity: Quantity,
    pub total_price: Decimal,
    pub state: CartItemState,
    pub images: CartItemImages,
    pub transform: Transform,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
