//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    carts::records::{
        CartItemImages, CartItemRecord, CartItemState, CartItemUuid, CartRecord, CartUuid,
        Transform, VariantChoices,
    },
    frames::records::{FrameRecord, FrameUuid, InnerDimensions},
    pricing::Quantity,
    principals::records::PrincipalUuid,
};

pub(crate) fn frame_record(price: Decimal) -> FrameRecord {
    FrameRecord {
        uuid: FrameUuid::new(),
        name: "Classic Oak".to_string(),
        price,
        image: "frames/oak.png".to_string(),
        dimensions: InnerDimensions {
            width: 20.0,
            height: 30.0,
        },
        created_by: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn cart_record(principal: PrincipalUuid) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        principal_uuid: principal,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A committed single-quantity line without variants, holding all three images.
pub(crate) fn cart_item_record(cart: CartUuid, frame: FrameUuid) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        frame_uuid: frame,
        variants: VariantChoices::default(),
        quantity: Quantity::ONE,
        total_price: Decimal::new(1000, 2),
        state: CartItemState::Committed,
        images: CartItemImages {
            original: Some("cart/original/a.png".to_string()),
            cropped: Some("cart/cropped/a.png".to_string()),
            adjusted: Some("cart/adjusted/old.png".to_string()),
        },
        transform: Transform::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
