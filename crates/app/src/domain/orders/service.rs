//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    blobs::{self, BlobStore},
    database::Db,
    domain::{
        carts::{
            records::{CartItemRecord, CartUuid},
            repositories::{CartsRepository, PgCartsRepository},
        },
        catalog::{Catalog, SelectedVariants},
        frames::repository::{FramesRepository, PgFramesRepository},
        orders::{
            data::{NewOrder, NewOrderItem},
            errors::OrdersServiceError,
            records::{
                Order, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, OrderedVariant,
                OrderedVariants,
            },
            repository::{OrdersRepository, PgOrdersRepository},
        },
        pricing::{compute_total, sum_totals, unit_price, validate_ownership},
        principals::{access::authorize, records::Principal},
        variants::{
            records::VariantRecord,
            repository::{PgVariantsRepository, VariantsRepository},
        },
    },
};

/// Blob directory for order images.
const ORDER_IMAGE_DIRECTORY: &str = "order_images";

#[derive(Clone)]
pub struct PgOrdersService {
    catalog: Catalog,
    carts: Arc<dyn CartsRepository>,
    orders: Arc<dyn OrdersRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService").finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_repositories(
            Arc::new(PgFramesRepository::new(db.clone())),
            Arc::new(PgVariantsRepository::new(db.clone())),
            Arc::new(PgCartsRepository::new(db.clone())),
            Arc::new(PgOrdersRepository::new(db)),
            blobs,
        )
    }

    #[must_use]
    pub fn with_repositories(
        frames: Arc<dyn FramesRepository>,
        variants: Arc<dyn VariantsRepository>,
        carts: Arc<dyn CartsRepository>,
        orders: Arc<dyn OrdersRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            catalog: Catalog::new(frames, variants),
            carts,
            orders,
            blobs,
        }
    }

    /// Price a cart line against the current catalog and copy its adjusted image.
    ///
    /// On success the copied image path is pushed onto `copied`.
    async fn snapshot(
        &self,
        position: i32,
        item: &CartItemRecord,
        copied: &mut Vec<String>,
    ) -> Result<NewOrderItem, OrdersServiceError> {
        let frame = self
            .catalog
            .get_frame(item.frame_uuid)
            .await
            .map_err(OrdersServiceError::Store)?;

        let selected = self.catalog.load_selection(item.variants).await?;
        let selection = selected.selection();

        validate_ownership(&frame, &selection)?;

        let unit_price = unit_price(&frame, &selection)?;
        let total_price = compute_total(&frame, &selection, item.quantity)?;

        let source = item
            .images
            .adjusted
            .as_deref()
            .ok_or(OrdersServiceError::MissingImage(item.uuid))?;

        let bytes = self.blobs.load(source).await?;
        let filename = source.rsplit('/').next().unwrap_or(source);
        let image = self
            .blobs
            .save(ORDER_IMAGE_DIRECTORY, filename, bytes)
            .await?;

        copied.push(image.clone());

        Ok(NewOrderItem {
            uuid: OrderItemUuid::new(),
            position,
            frame_uuid: frame.uuid,
            frame_name: frame.name.clone(),
            variants: ordered_variants(&selected),
            quantity: item.quantity,
            unit_price,
            total_price,
            image,
        })
    }

    async fn snapshot_all(
        &self,
        items: &[CartItemRecord],
        copied: &mut Vec<String>,
    ) -> Result<Vec<NewOrderItem>, OrdersServiceError> {
        let mut snapshots = Vec::with_capacity(items.len());

        for (position, item) in (0_i32..).zip(items) {
            snapshots.push(self.snapshot(position, item, copied).await?);
        }

        Ok(snapshots)
    }

    async fn visible_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let order = self.orders.get_order(order).await?;

        if !principal.role.is_staff() && order.order.principal_uuid != principal.uuid {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(order)
    }
}

fn ordered_variant(variant: Option<&VariantRecord>) -> Option<OrderedVariant> {
    variant.map(|variant| OrderedVariant {
        uuid: variant.uuid,
        name: variant.name.clone(),
    })
}

fn ordered_variants(selected: &SelectedVariants) -> OrderedVariants {
    OrderedVariants {
        color: ordered_variant(selected.color.as_ref()),
        size: ordered_variant(selected.size.as_ref()),
        finish: ordered_variant(selected.finish.as_ref()),
        hanging: ordered_variant(selected.hanging.as_ref()),
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        principal: Option<Principal>,
    ) -> Result<Order, OrdersServiceError> {
        let principal = authorize(principal)?;

        let cart = self
            .carts
            .get_or_create_cart(principal.uuid, CartUuid::new())
            .await
            .map_err(OrdersServiceError::Store)?;

        let lines = self
            .carts
            .list_items(cart.uuid)
            .await
            .map_err(OrdersServiceError::Store)?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut copied = Vec::new();

        let items = match self.snapshot_all(&lines, &mut copied).await {
            Ok(items) => items,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), copied).await;

                return Err(error);
            }
        };

        let total_amount = match sum_totals(items.iter().map(|item| item.total_price)) {
            Ok(total_amount) => total_amount,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), copied).await;

                return Err(error.into());
            }
        };

        let placed = self
            .orders
            .create_order(NewOrder {
                uuid: OrderUuid::new(),
                principal_uuid: principal.uuid,
                total_amount,
                items,
                cart_uuid: cart.uuid,
                cart_items: lines.iter().map(|line| line.uuid).collect(),
            })
            .await;

        let order = match placed {
            Ok(order) => order,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), copied).await;

                return Err(OrdersServiceError::Store(error));
            }
        };

        blobs::release(
            self.blobs.as_ref(),
            lines
                .into_iter()
                .flat_map(|line| line.images.into_paths()),
        )
        .await;

        info!(
            order_uuid = %order.order.uuid,
            principal_uuid = %principal.uuid,
            items = order.items.len(),
            total_amount = %order.order.total_amount,
            "placed order"
        );

        Ok(order)
    }

    async fn list_orders(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let principal = authorize(principal)?;

        let owner = (!principal.role.is_staff()).then_some(principal.uuid);

        Ok(self.orders.list_orders(owner).await?)
    }

    async fn get_order(
        &self,
        principal: Option<Principal>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let principal = authorize(principal)?;

        self.visible_order(&principal, order).await
    }

    async fn transition_order(
        &self,
        principal: Option<Principal>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let current = self.orders.get_order(order).await?.order.status;

        if !current.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        let updated = self.orders.update_status(order, status).await?;

        info!(
            order_uuid = %order,
            principal_uuid = %principal.uuid,
            from = %current,
            to = %status,
            "changed order status"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the caller's cart into a pending order and empty the cart.
    async fn place_order(
        &self,
        principal: Option<Principal>,
    ) -> Result<Order, OrdersServiceError>;

    /// The caller's orders, or every order for staff.
    async fn list_orders(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// An order the caller placed. Staff may read any order.
    async fn get_order(
        &self,
        principal: Option<Principal>,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    async fn transition_order(
        &self,
        principal: Option<Principal>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
