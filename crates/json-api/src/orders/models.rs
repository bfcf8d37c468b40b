//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::orders::records::{
    Order, OrderItemRecord, OrderRecord, OrderedVariant,
};

use crate::requests::format_amount;

/// A variant as named when the order was placed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderedVariantResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<OrderedVariant> for OrderedVariantResponse {
    fn from(variant: OrderedVariant) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            name: variant.name,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub position: i32,
    /// `null` once the frame has left the catalog
    pub frame_uuid: Option<Uuid>,
    pub frame_name: String,
    pub color_variant: Option<OrderedVariantResponse>,
    pub size_variant: Option<OrderedVariantResponse>,
    pub finish_variant: Option<OrderedVariantResponse>,
    pub hanging_variant: Option<OrderedVariantResponse>,
    pub quantity: u32,
    pub unit_price: String,
    pub total_price: String,
    pub image: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        let variants = item.variants;

        Self {
            uuid: item.uuid.into_uuid(),
            position: item.position,
            frame_uuid: item.frame_uuid.map(Into::into),
            frame_name: item.frame_name,
            color_variant: variants.color.map(Into::into),
            size_variant: variants.size.map(Into::into),
            finish_variant: variants.finish.map(Into::into),
            hanging_variant: variants.hanging.map(Into::into),
            quantity: item.quantity.get(),
            unit_price: format_amount(item.unit_price),
            total_price: format_amount(item.total_price),
            image: item.image,
        }
    }
}

/// Order Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSummaryResponse {
    pub uuid: Uuid,
    pub principal_uuid: Uuid,
    /// `pending`, `confirmed`, `shipped`, `delivered` or `cancelled`
    pub status: String,
    pub total_amount: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderSummaryResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            principal_uuid: order.principal_uuid.into_uuid(),
            status: order.status.as_str().to_string(),
            total_amount: format_amount(order.total_amount),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    #[serde(flatten)]
    pub order: OrderSummaryResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order: order.order.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}
