//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::carts::records::{Cart, CartItemRecord, Transform};

use crate::requests::format_amount;

/// Placement of the picture inside the frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct TransformBody {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub frame_rotation: f64,
}

impl Default for TransformBody {
    fn default() -> Self {
        Transform::default().into()
    }
}

impl From<Transform> for TransformBody {
    fn from(transform: Transform) -> Self {
        Self {
            translate_x: transform.translate_x,
            translate_y: transform.translate_y,
            scale: transform.scale,
            rotation: transform.rotation,
            frame_rotation: transform.frame_rotation,
        }
    }
}

impl From<TransformBody> for Transform {
    fn from(body: TransformBody) -> Self {
        Self {
            translate_x: body.translate_x,
            translate_y: body.translate_y,
            scale: body.scale,
            rotation: body.rotation,
            frame_rotation: body.frame_rotation,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub frame_uuid: Uuid,
    pub color_variant: Option<Uuid>,
    pub size_variant: Option<Uuid>,
    pub finish_variant: Option<Uuid>,
    pub hanging_variant: Option<Uuid>,
    pub quantity: u32,
    /// Line total, e.g. `"57.00"`
    pub total_price: String,
    /// `committed` or `updated`
    pub state: String,
    pub original_image: Option<String>,
    pub cropped_image: Option<String>,
    pub adjusted_image: Option<String>,
    pub transform: TransformBody,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            frame_uuid: item.frame_uuid.into_uuid(),
            color_variant: item.variants.color.map(Into::into),
            size_variant: item.variants.size.map(Into::into),
            finish_variant: item.variants.finish.map(Into::into),
            hanging_variant: item.variants.hanging.map(Into::into),
            quantity: item.quantity.get(),
            total_price: format_amount(item.total_price),
            state: item.state.as_str().to_string(),
            original_image: item.images.original,
            cropped_image: item.images.cropped,
            adjusted_image: item.images.adjusted,
            transform: item.transform.into(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,
    /// Sum of the item totals
    pub subtotal: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.cart.uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            subtotal: format_amount(cart.subtotal),
        }
    }
}
