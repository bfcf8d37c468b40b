//! Cart Data

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    blobs::ImageUpload,
    domain::{
        carts::records::{
            CartItemImages, CartItemUuid, CartUuid, ImageRole, Transform, VariantChoices,
        },
        frames::records::FrameUuid,
        pricing::Quantity,
        variants::records::VariantUuid,
    },
    patch::Patch,
};

/// Where a cart item image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes sent with the request.
    Upload(ImageUpload),

    /// A path returned by an earlier image upload.
    Stored(String),
}

/// Required images absent when committing a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required images: {}", missing.iter().map(|role| role.field_name()).collect::<Vec<_>>().join(", "))]
pub struct MissingRequiredImage {
    pub missing: SmallVec<[ImageRole; 2]>,
}

/// A cart item being composed by the client, not yet in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCartItem {
    pub uuid: CartItemUuid,
    pub frame: FrameUuid,
    pub variants: VariantChoices,
    pub quantity: Quantity,
    pub original_image: Option<ImageSource>,
    pub cropped_image: Option<ImageSource>,
    pub adjusted_image: Option<ImageSource>,
    pub transform: Transform,
}

impl DraftCartItem {
    #[must_use]
    pub fn new(frame: FrameUuid) -> Self {
        Self {
            uuid: CartItemUuid::new(),
            frame,
            variants: VariantChoices::default(),
            quantity: Quantity::default(),
            original_image: None,
            cropped_image: None,
            adjusted_image: None,
            transform: Transform::default(),
        }
    }

    /// Promote the draft once both the original and the adjusted image are present.
    ///
    /// # Errors
    ///
    /// Returns [`MissingRequiredImage`] listing every absent required image.
    pub fn commit(self) -> Result<CommittedCartItem, MissingRequiredImage> {
        match (self.original_image, self.adjusted_image) {
            (Some(original_image), Some(adjusted_image)) => Ok(CommittedCartItem {
                uuid: self.uuid,
                frame: self.frame,
                variants: self.variants,
                quantity: self.quantity,
                original_image,
                cropped_image: self.cropped_image,
                adjusted_image,
                transform: self.transform,
            }),
            (original, adjusted) => {
                let mut missing = SmallVec::new();

                if original.is_none() {
                    missing.push(ImageRole::Original);
                }

                if adjusted.is_none() {
                    missing.push(ImageRole::Adjusted);
                }

                Err(MissingRequiredImage { missing })
            }
        }
    }
}

/// A draft that carries both required images.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedCartItem {
    pub uuid: CartItemUuid,
    pub frame: FrameUuid,
    pub variants: VariantChoices,
    pub quantity: Quantity,
    pub original_image: ImageSource,
    pub cropped_image: Option<ImageSource>,
    pub adjusted_image: ImageSource,
    pub transform: Transform,
}

/// A cart item priced and with its images stored, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub frame_uuid: FrameUuid,
    pub variants: VariantChoices,
    pub quantity: Quantity,
    pub total_price: Decimal,
    pub images: CartItemImages,
    pub transform: Transform,
}

/// Partial update of transform components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub translate_x: Option<f64>,
    pub translate_y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub frame_rotation: Option<f64>,
}

impl TransformPatch {
    #[must_use]
    pub fn apply(self, current: Transform) -> Transform {
        Transform {
            translate_x: self.translate_x.unwrap_or(current.translate_x),
            translate_y: self.translate_y.unwrap_or(current.translate_y),
            scale: self.scale.unwrap_or(current.scale),
            rotation: self.rotation.unwrap_or(current.rotation),
            frame_rotation: self.frame_rotation.unwrap_or(current.frame_rotation),
        }
    }
}

/// Partial update of a cart item.
///
/// Variant selections distinguish "leave as is" from "remove the selection".
/// The total is never part of the patch: it is recomputed on every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItemPatch {
    pub frame: Option<FrameUuid>,
    pub color_variant: Patch<VariantUuid>,
    pub size_variant: Patch<VariantUuid>,
    pub finish_variant: Patch<VariantUuid>,
    pub hanging_variant: Patch<VariantUuid>,
    pub quantity: Option<Quantity>,
    pub adjusted_image: Option<ImageUpload>,
    pub transform: TransformPatch,
}

impl CartItemPatch {
    /// Variant selections after applying the patch to `current`.
    #[must_use]
    pub fn apply_variants(&self, current: VariantChoices) -> VariantChoices {
        VariantChoices {
            color: self.color_variant.apply(current.color),
            size: self.size_variant.apply(current.size),
            finish: self.finish_variant.apply(current.finish),
            hanging: self.hanging_variant.apply(current.hanging),
        }
    }
}
