//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use frameshop_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{
                CartItemImages, CartItemRecord, CartItemState, CartItemUuid, CartRecord,
                CartUuid, Transform, VariantChoices,
            },
        },
        frames::{
            MockFramesService,
            records::{FrameDetails, FrameRecord, FrameUuid, InnerDimensions},
        },
        orders::{
            MockOrdersService,
            records::{
                Order, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
                OrderedVariant, OrderedVariants,
            },
        },
        pricing::Quantity,
        principals::{
            MockPrincipalsService,
            records::{Principal, PrincipalRecord, PrincipalUuid, Role},
        },
        variants::{
            MockVariantsService,
            records::{VariantKind, VariantRecord, VariantUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const CUSTOMER: Principal = Principal {
    uuid: PrincipalUuid::from_uuid(Uuid::nil()),
    role: Role::Customer,
    blocked: false,
};

pub(crate) const EMPLOYEE: Principal = Principal {
    uuid: PrincipalUuid::from_uuid(Uuid::from_u128(1)),
    role: Role::Employee,
    blocked: false,
};

pub(crate) const ADMIN: Principal = Principal {
    uuid: PrincipalUuid::from_uuid(Uuid::from_u128(2)),
    role: Role::Admin,
    blocked: false,
};

/// Service mocks; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct MockApp {
    pub(crate) frames: MockFramesService,
    pub(crate) variants: MockVariantsService,
    pub(crate) principals: MockPrincipalsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl MockApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            frames: Arc::new(self.frames),
            variants: Arc::new(self.variants),
            principals: Arc::new(self.principals),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as `principal`, skipping token authentication.
    pub(crate) fn service(self, principal: Option<Principal>, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(InjectPrincipal(principal))
                .push(route),
        )
    }
}

#[derive(Debug)]
struct InjectPrincipal(Option<Principal>);

#[handler]
impl InjectPrincipal {
    async fn handle(&self, depot: &mut Depot) {
        if let Some(principal) = self.0 {
            depot.insert_principal(principal);
        }
    }
}

pub(crate) fn frame_record(uuid: FrameUuid) -> FrameRecord {
    FrameRecord {
        uuid,
        name: "Classic Oak".to_string(),
        price: Decimal::new(2400, 2),
        image: "frames/oak.png".to_string(),
        dimensions: InnerDimensions {
            width: 20.0,
            height: 30.0,
        },
        created_by: Some(EMPLOYEE.uuid),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn variant_record(frame: FrameUuid, kind: VariantKind, name: &str) -> VariantRecord {
    VariantRecord {
        uuid: VariantUuid::new(),
        frame_uuid: frame,
        kind,
        name: name.to_string(),
        price: Decimal::new(450, 2),
        image: None,
        dimensions: (kind == VariantKind::Size).then_some(InnerDimensions {
            width: 40.0,
            height: 50.0,
        }),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn frame_details(uuid: FrameUuid) -> FrameDetails {
    FrameDetails::new(
        frame_record(uuid),
        [
            variant_record(uuid, VariantKind::Color, "Black"),
            variant_record(uuid, VariantKind::Size, "Large"),
        ],
    )
}

pub(crate) fn principal_record(principal: Principal, username: &str) -> PrincipalRecord {
    PrincipalRecord {
        uuid: principal.uuid,
        username: username.to_string(),
        name: None,
        email: format!("{username}@example.com"),
        phone: None,
        role: principal.role,
        blocked: principal.blocked,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn cart_record(principal: Principal) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        principal_uuid: principal.uuid,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn cart_item_record(cart: CartUuid, frame: FrameUuid) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        frame_uuid: frame,
        variants: VariantChoices::default(),
        quantity: Quantity::ONE,
        total_price: Decimal::new(2400, 2),
        state: CartItemState::Committed,
        images: CartItemImages {
            original: Some("cart/original/a.png".to_string()),
            cropped: None,
            adjusted: Some("cart/adjusted/a.png".to_string()),
        },
        transform: Transform::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn order(principal: Principal, status: OrderStatus) -> Order {
    let uuid = OrderUuid::new();

    Order {
        order: OrderRecord {
            uuid,
            principal_uuid: principal.uuid,
            status,
            total_amount: Decimal::new(5700, 2),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            position: 0,
            frame_uuid: Some(FrameUuid::new()),
            frame_name: "Classic Oak".to_string(),
            variants: OrderedVariants {
                color: Some(OrderedVariant {
                    uuid: VariantUuid::new(),
                    name: "Black".to_string(),
                }),
                ..OrderedVariants::default()
            },
            quantity: Quantity::ONE,
            unit_price: Decimal::new(5700, 2),
            total_price: Decimal::new(5700, 2),
            image: "order_images/a.png".to_string(),
        }],
    }
}
