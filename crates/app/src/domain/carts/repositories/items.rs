//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::column_decode_error,
    domain::{
        carts::{
            data::NewCartItemRecord,
            records::{
                CartItemImages, CartItemRecord, CartItemState, CartItemUuid, CartUuid, Transform,
                VariantChoices,
            },
        },
        frames::records::FrameUuid,
        pricing::{InvalidQuantity, Quantity},
        variants::records::VariantUuid,
    },
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("../sql/get_cart_item.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const IMAGE_IN_USE_SQL: &str = include_str!("../sql/image_in_use.sql");

pub(super) async fn list_cart_items(
    pool: &PgPool,
    cart: CartUuid,
) -> Result<Vec<CartItemRecord>, sqlx::Error> {
    query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
        .bind(cart.into_uuid())
        .fetch_all(pool)
        .await
}

pub(super) async fn get_cart_item(
    pool: &PgPool,
    cart: CartUuid,
    item: CartItemUuid,
) -> Result<CartItemRecord, sqlx::Error> {
    query_as::<Postgres, CartItemRecord>(GET_CART_ITEM_SQL)
        .bind(item.into_uuid())
        .bind(cart.into_uuid())
        .fetch_one(pool)
        .await
}

pub(super) async fn create_cart_item(
    pool: &PgPool,
    item: NewCartItemRecord,
) -> Result<CartItemRecord, sqlx::Error> {
    let [color, size, finish, hanging] = variant_uuids(item.variants);

    query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
        .bind(item.uuid.into_uuid())
        .bind(item.cart_uuid.into_uuid())
        .bind(item.frame_uuid.into_uuid())
        .bind(color)
        .bind(size)
        .bind(finish)
        .bind(hanging)
        .bind(i32::from(item.quantity))
        .bind(item.total_price)
        .bind(item.images.original)
        .bind(item.images.cropped)
        .bind(item.images.adjusted)
        .bind(item.transform.translate_x)
        .bind(item.transform.translate_y)
        .bind(item.transform.scale)
        .bind(item.transform.rotation)
        .bind(item.transform.frame_rotation)
        .fetch_one(pool)
        .await
}

pub(super) async fn update_cart_item(
    pool: &PgPool,
    item: CartItemRecord,
) -> Result<CartItemRecord, sqlx::Error> {
    let [color, size, finish, hanging] = variant_uuids(item.variants);

    query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
        .bind(item.uuid.into_uuid())
        .bind(item.cart_uuid.into_uuid())
        .bind(item.frame_uuid.into_uuid())
        .bind(color)
        .bind(size)
        .bind(finish)
        .bind(hanging)
        .bind(i32::from(item.quantity))
        .bind(item.total_price)
        .bind(item.state.as_str())
        .bind(item.images.original)
        .bind(item.images.cropped)
        .bind(item.images.adjusted)
        .bind(item.transform.translate_x)
        .bind(item.transform.translate_y)
        .bind(item.transform.scale)
        .bind(item.transform.rotation)
        .bind(item.transform.frame_rotation)
        .fetch_one(pool)
        .await
}

pub(super) async fn delete_cart_item(
    pool: &PgPool,
    cart: CartUuid,
    item: CartItemUuid,
) -> Result<CartItemRecord, sqlx::Error> {
    query_as::<Postgres, CartItemRecord>(DELETE_CART_ITEM_SQL)
        .bind(item.into_uuid())
        .bind(cart.into_uuid())
        .fetch_one(pool)
        .await
}

pub(super) async fn image_in_use(pool: &PgPool, path: &str) -> Result<bool, sqlx::Error> {
    query_scalar(IMAGE_IN_USE_SQL).bind(path).fetch_one(pool).await
}

fn variant_uuids(variants: VariantChoices) -> [Option<Uuid>; 4] {
    [
        variants.color,
        variants.size,
        variants.finish,
        variants.hanging,
    ]
    .map(|variant| variant.map(VariantUuid::into_uuid))
}

fn try_get_variant(row: &PgRow, column: &str) -> sqlx::Result<Option<VariantUuid>> {
    Ok(row
        .try_get::<Option<Uuid>, _>(column)?
        .map(VariantUuid::from_uuid))
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let state: String = row.try_get("state")?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            frame_uuid: FrameUuid::from_uuid(row.try_get("frame_uuid")?),
            variants: VariantChoices {
                color: try_get_variant(row, "color_variant_uuid")?,
                size: try_get_variant(row, "size_variant_uuid")?,
                finish: try_get_variant(row, "finish_variant_uuid")?,
                hanging: try_get_variant(row, "hanging_variant_uuid")?,
            },
            quantity: Quantity::try_from(i64::from(quantity))
                .map_err(|error: InvalidQuantity| column_decode_error("quantity", error))?,
            total_price: row.try_get("total_price")?,
            state: CartItemState::parse(&state).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "state".to_string(),
                source: format!("unknown cart item state: {state}").into(),
            })?,
            images: CartItemImages {
                original: row.try_get("original_image")?,
                cropped: row.try_get("cropped_image")?,
                adjusted: row.try_get("adjusted_image")?,
            },
            transform: Transform {
                translate_x: row.try_get("translate_x")?,
                translate_y: row.try_get("translate_y")?,
                scale: row.try_get("scale")?,
                rotation: row.try_get("rotation")?,
                frame_rotation: row.try_get("frame_rotation")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
