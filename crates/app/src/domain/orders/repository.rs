//! Orders Repository

use std::collections::HashMap;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgExecutor, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{Db, StoreError, column_decode_error},
    domain::{
        carts::records::CartItemUuid,
        frames::records::FrameUuid,
        orders::{
            data::NewOrder,
            records::{
                Order, OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
                OrderedVariant, OrderedVariants,
            },
        },
        pricing::Quantity,
        principals::records::PrincipalUuid,
        variants::records::{VariantKind, VariantUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("sql/clear_cart_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Insert an order with its items and remove the consumed cart lines, atomically.
    async fn create_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Order, StoreError>;

    /// Orders in placement order, optionally restricted to one principal.
    async fn list_orders(&self, principal: Option<PrincipalUuid>)
    -> Result<Vec<Order>, StoreError>;

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

async fn list_items<'e, E>(
    executor: E,
    orders: Vec<OrderUuid>,
) -> Result<Vec<OrderItemRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let orders: Vec<Uuid> = orders.into_iter().map(OrderUuid::into_uuid).collect();

    query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
        .bind(orders)
        .fetch_all(executor)
        .await
}

fn variant_columns(
    variants: &OrderedVariants,
    kind: VariantKind,
) -> (Option<Uuid>, Option<String>) {
    variants
        .get(kind)
        .map(|variant| (Some(variant.uuid.into_uuid()), Some(variant.name.clone())))
        .unwrap_or_default()
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.principal_uuid.into_uuid())
            .bind(order.total_amount)
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(order.items.len());

        for item in order.items {
            let (color_uuid, color_name) = variant_columns(&item.variants, VariantKind::Color);
            let (size_uuid, size_name) = variant_columns(&item.variants, VariantKind::Size);
            let (finish_uuid, finish_name) = variant_columns(&item.variants, VariantKind::Finish);
            let (hanging_uuid, hanging_name) =
                variant_columns(&item.variants, VariantKind::Hanging);

            let created = query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(record.uuid.into_uuid())
                .bind(item.position)
                .bind(item.frame_uuid.into_uuid())
                .bind(item.frame_name)
                .bind(color_uuid)
                .bind(color_name)
                .bind(size_uuid)
                .bind(size_name)
                .bind(finish_uuid)
                .bind(finish_name)
                .bind(hanging_uuid)
                .bind(hanging_name)
                .bind(i32::from(item.quantity))
                .bind(item.unit_price)
                .bind(item.total_price)
                .bind(item.image)
                .fetch_one(&mut *tx)
                .await?;

            items.push(created);
        }

        let cart_items: Vec<Uuid> = order
            .cart_items
            .into_iter()
            .map(CartItemUuid::into_uuid)
            .collect();

        query(CLEAR_CART_ITEMS_SQL)
            .bind(order.cart_uuid.into_uuid())
            .bind(cart_items)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Order {
            order: record,
            items,
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, StoreError> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        let items = list_items(self.db.pool(), vec![record.uuid]).await?;

        Ok(Order {
            order: record,
            items,
        })
    }

    async fn list_orders(
        &self,
        principal: Option<PrincipalUuid>,
    ) -> Result<Vec<Order>, StoreError> {
        let records = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(principal.map(PrincipalUuid::into_uuid))
            .fetch_all(self.db.pool())
            .await?;

        let uuids = records.iter().map(|record| record.uuid).collect();

        let mut items: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in list_items(self.db.pool(), uuids).await? {
            items.entry(item.order_uuid).or_default().push(item);
        }

        Ok(records
            .into_iter()
            .map(|record| Order {
                items: items.remove(&record.uuid).unwrap_or_default(),
                order: record,
            })
            .collect())
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, StoreError> {
        let updated = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(updated)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            principal_uuid: PrincipalUuid::from_uuid(row.try_get("principal_uuid")?),
            status: status
                .parse()
                .map_err(|error| column_decode_error("status", error))?,
            total_amount: row.try_get("total_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_ordered_variant(
    row: &PgRow,
    kind: VariantKind,
) -> sqlx::Result<Option<OrderedVariant>> {
    let prefix = kind.field_name();
    let uuid: Option<Uuid> = row.try_get(format!("{prefix}_uuid").as_str())?;
    let name: Option<String> = row.try_get(format!("{prefix}_name").as_str())?;

    Ok(uuid.zip(name).map(|(uuid, name)| OrderedVariant {
        uuid: VariantUuid::from_uuid(uuid),
        name,
    }))
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let frame_uuid: Option<Uuid> = row.try_get("frame_uuid")?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            position: row.try_get("position")?,
            frame_uuid: frame_uuid.map(FrameUuid::from_uuid),
            frame_name: row.try_get("frame_name")?,
            variants: OrderedVariants {
                color: try_get_ordered_variant(row, VariantKind::Color)?,
                size: try_get_ordered_variant(row, VariantKind::Size)?,
                finish: try_get_ordered_variant(row, VariantKind::Finish)?,
                hanging: try_get_ordered_variant(row, VariantKind::Hanging)?,
            },
            quantity: Quantity::try_from(i64::from(quantity))
                .map_err(|error| column_decode_error("quantity", error))?,
            unit_price: row.try_get("unit_price")?,
            total_price: row.try_get("total_price")?,
            image: row.try_get("image")?,
        })
    }
}
