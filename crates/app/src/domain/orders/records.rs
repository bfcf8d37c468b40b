//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{
        frames::records::FrameUuid,
        pricing::Quantity,
        principals::records::PrincipalUuid,
        variants::records::{VariantKind, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Orders advance one step at a time. Cancelling is possible until delivery
    /// and nothing leaves `Delivered` or `Cancelled`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (
                    Self::Pending | Self::Confirmed | Self::Shipped,
                    Self::Cancelled
                )
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub principal_uuid: PrincipalUuid,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A variant as it was named when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedVariant {
    pub uuid: VariantUuid,
    pub name: String,
}

/// Variant snapshot per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedVariants {
    pub color: Option<OrderedVariant>,
    pub size: Option<OrderedVariant>,
    pub finish: Option<OrderedVariant>,
    pub hanging: Option<OrderedVariant>,
}

impl OrderedVariants {
    #[must_use]
    pub const fn get(&self, kind: VariantKind) -> Option<&OrderedVariant> {
        match kind {
            VariantKind::Color => self.color.as_ref(),
            VariantKind::Size => self.size.as_ref(),
            VariantKind::Finish => self.finish.as_ref(),
            VariantKind::Hanging => self.hanging.as_ref(),
        }
    }
}

/// Frozen copy of a cart line. Never repriced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub position: i32,

    /// Unset once the frame is deleted from the catalog.
    pub frame_uuid: Option<FrameUuid>,
    pub frame_name: String,
    pub variants: OrderedVariants,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub image: String,
}

/// An order with its items in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn orders_advance_one_step_at_a_time() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));

        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn cancellation_is_open_until_delivery() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for next in ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(UnknownOrderStatus("lost".to_string()))
        );
    }
}
