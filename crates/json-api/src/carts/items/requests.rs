//! Cart item request bodies.

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::{
    domain::{
        carts::{
            data::{CartItemPatch, DraftCartItem, ImageSource, TransformPatch},
            records::{CartItemUuid, VariantChoices},
        },
        frames::records::FrameUuid,
        pricing::Quantity,
        variants::records::VariantUuid,
    },
    patch::Patch,
};

use crate::{
    carts::models::TransformBody,
    extensions::*,
    requests::{ImageRequest, double_option},
};

/// An image given inline or by the path a previous upload returned
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ImageSourceRequest {
    /// Path from `/uploads/original` or `/uploads/cropped`
    Stored { path: String },
    Upload(ImageRequest),
}

impl ImageSourceRequest {
    fn into_source(self, field: &str) -> Result<ImageSource, StatusError> {
        match self {
            Self::Stored { path } => Ok(ImageSource::Stored(path)),
            Self::Upload(image) => image.decode(field).map(ImageSource::Upload),
        }
    }
}

fn source(image: Option<ImageSourceRequest>, field: &str) -> Result<Option<ImageSource>, StatusError> {
    image.map(|image| image.into_source(field)).transpose()
}

fn quantity(value: i64) -> Result<Quantity, StatusError> {
    Quantity::try_from(value).or_400("quantity")
}

const fn default_quantity() -> i64 {
    1
}

/// Add Cart Item Request
///
/// `original_image` and `adjusted_image` are required for the item to be added.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Client-chosen identifier; generated when omitted
    pub uuid: Option<Uuid>,
    pub frame: Uuid,
    pub color_variant: Option<Uuid>,
    pub size_variant: Option<Uuid>,
    pub finish_variant: Option<Uuid>,
    pub hanging_variant: Option<Uuid>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub original_image: Option<ImageSourceRequest>,
    pub cropped_image: Option<ImageSourceRequest>,
    pub adjusted_image: Option<ImageSourceRequest>,
    #[serde(default)]
    pub transform: TransformBody,
}

impl AddCartItemRequest {
    pub(crate) fn into_draft(self) -> Result<DraftCartItem, StatusError> {
        Ok(DraftCartItem {
            uuid: self
                .uuid
                .map_or_else(CartItemUuid::new, CartItemUuid::from_uuid),
            frame: FrameUuid::from_uuid(self.frame),
            variants: VariantChoices {
                color: self.color_variant.map(VariantUuid::from_uuid),
                size: self.size_variant.map(VariantUuid::from_uuid),
                finish: self.finish_variant.map(VariantUuid::from_uuid),
                hanging: self.hanging_variant.map(VariantUuid::from_uuid),
            },
            quantity: quantity(self.quantity)?,
            original_image: source(self.original_image, "original_image")?,
            cropped_image: source(self.cropped_image, "cropped_image")?,
            adjusted_image: source(self.adjusted_image, "adjusted_image")?,
            transform: self.transform.into(),
        })
    }
}

/// Transform components to change
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransformPatchBody {
    pub translate_x: Option<f64>,
    pub translate_y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub frame_rotation: Option<f64>,
}

impl From<TransformPatchBody> for TransformPatch {
    fn from(body: TransformPatchBody) -> Self {
        Self {
            translate_x: body.translate_x,
            translate_y: body.translate_y,
            scale: body.scale,
            rotation: body.rotation,
            frame_rotation: body.frame_rotation,
        }
    }
}

/// Update Cart Item Request
///
/// Omitted fields keep their value. `null` removes a variant selection.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub frame: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    pub color_variant: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub size_variant: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub finish_variant: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub hanging_variant: Option<Option<Uuid>>,
    pub quantity: Option<i64>,
    /// Replaces the stored adjusted image
    pub adjusted_image: Option<ImageRequest>,
    #[serde(default)]
    pub transform: TransformPatchBody,
}

fn variant(value: Option<Option<Uuid>>) -> Patch<VariantUuid> {
    value.map(|inner| inner.map(VariantUuid::from_uuid)).into()
}

impl UpdateCartItemRequest {
    pub(crate) fn into_patch(self) -> Result<CartItemPatch, StatusError> {
        Ok(CartItemPatch {
            frame: self.frame.map(FrameUuid::from_uuid),
            color_variant: variant(self.color_variant),
            size_variant: variant(self.size_variant),
            finish_variant: variant(self.finish_variant),
            hanging_variant: variant(self.hanging_variant),
            quantity: self.quantity.map(quantity).transpose()?,
            adjusted_image: self
                .adjusted_image
                .map(|image| image.decode("adjusted_image"))
                .transpose()?,
            transform: self.transform.into(),
        })
    }
}
