//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    principals::records::PrincipalUuid,
};

const GET_OR_CREATE_CART_SQL: &str = include_str!("../sql/get_or_create_cart.sql");

pub(super) async fn get_or_create_cart(
    pool: &PgPool,
    principal: PrincipalUuid,
    cart: CartUuid,
) -> Result<CartRecord, sqlx::Error> {
    query_as::<Postgres, CartRecord>(GET_OR_CREATE_CART_SQL)
        .bind(cart.into_uuid())
        .bind(principal.into_uuid())
        .fetch_one(pool)
        .await
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            principal_uuid: PrincipalUuid::from_uuid(row.try_get("principal_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
