//! Order Data

use rust_decimal::Decimal;

use crate::domain::{
    carts::records::{CartItemUuid, CartUuid},
    frames::records::FrameUuid,
    orders::records::{OrderItemUuid, OrderUuid, OrderedVariants},
    pricing::Quantity,
    principals::records::PrincipalUuid,
};

/// A priced snapshot of one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub position: i32,
    pub frame_uuid: FrameUuid,
    pub frame_name: String,
    pub variants: OrderedVariants,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub image: String,
}

/// An order to insert, with the cart lines it consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub principal_uuid: PrincipalUuid,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,

    /// Cart the snapshotted lines belong to.
    pub cart_uuid: CartUuid,

    /// Lines removed from the cart when the order is stored.
    pub cart_items: Vec<CartItemUuid>,
}
