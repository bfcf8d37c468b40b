//! Variants Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{Db, StoreError, column_decode_error},
    domain::{
        frames::records::{FrameUuid, InnerDimensions},
        variants::{
            data::NewVariant,
            records::{VariantKind, VariantRecord, VariantUuid},
        },
    },
};

const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const VARIANT_NAME_TAKEN_SQL: &str = include_str!("sql/variant_name_taken.sql");
const UPDATE_VARIANT_SQL: &str = include_str!("sql/update_variant.sql");
const DELETE_VARIANT_SQL: &str = include_str!("sql/delete_variant.sql");

#[automock]
#[async_trait]
pub trait VariantsRepository: Send + Sync {
    async fn create_variant(&self, variant: NewVariant) -> Result<VariantRecord, StoreError>;

    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError>;

    /// Every variant of the given frames.
    async fn list_variants(&self, frames: Vec<FrameUuid>)
    -> Result<Vec<VariantRecord>, StoreError>;

    /// Whether another variant of `kind` under `frame` already uses `name`.
    ///
    /// `exclude` is the variant being renamed, which may keep its own name.
    async fn variant_name_taken(
        &self,
        frame: FrameUuid,
        kind: VariantKind,
        name: String,
        exclude: Option<VariantUuid>,
    ) -> Result<bool, StoreError>;

    /// Persist every mutable field of `variant`.
    async fn update_variant(&self, variant: VariantRecord) -> Result<VariantRecord, StoreError>;

    /// Delete a variant, returning the deleted row.
    ///
    /// Cart items that selected it lose the selection.
    async fn delete_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgVariantsRepository {
    db: Db,
}

impl PgVariantsRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VariantsRepository for PgVariantsRepository {
    async fn create_variant(&self, variant: NewVariant) -> Result<VariantRecord, StoreError> {
        let created = query_as::<Postgres, VariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.frame_uuid.into_uuid())
            .bind(variant.kind.as_str())
            .bind(variant.name)
            .bind(variant.price)
            .bind(variant.image)
            .bind(variant.dimensions.map(|d| d.width))
            .bind(variant.dimensions.map(|d| d.height))
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError> {
        let record = query_as::<Postgres, VariantRecord>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn list_variants(
        &self,
        frames: Vec<FrameUuid>,
    ) -> Result<Vec<VariantRecord>, StoreError> {
        let frames: Vec<Uuid> = frames.into_iter().map(FrameUuid::into_uuid).collect();

        let records = query_as::<Postgres, VariantRecord>(LIST_VARIANTS_SQL)
            .bind(frames)
            .fetch_all(self.db.pool())
            .await?;

        Ok(records)
    }

    async fn variant_name_taken(
        &self,
        frame: FrameUuid,
        kind: VariantKind,
        name: String,
        exclude: Option<VariantUuid>,
    ) -> Result<bool, StoreError> {
        let taken: bool = query_scalar(VARIANT_NAME_TAKEN_SQL)
            .bind(frame.into_uuid())
            .bind(kind.as_str())
            .bind(name)
            .bind(exclude.map(VariantUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await?;

        Ok(taken)
    }

    async fn update_variant(&self, variant: VariantRecord) -> Result<VariantRecord, StoreError> {
        let updated = query_as::<Postgres, VariantRecord>(UPDATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.name)
            .bind(variant.price)
            .bind(variant.image)
            .bind(variant.dimensions.map(|d| d.width))
            .bind(variant.dimensions.map(|d| d.height))
            .fetch_one(self.db.pool())
            .await?;

        Ok(updated)
    }

    async fn delete_variant(&self, variant: VariantUuid) -> Result<VariantRecord, StoreError> {
        let deleted = query_as::<Postgres, VariantRecord>(DELETE_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(deleted)
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;
        let inner_width: Option<f64> = row.try_get("inner_width")?;
        let inner_height: Option<f64> = row.try_get("inner_height")?;

        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            frame_uuid: FrameUuid::from_uuid(row.try_get("frame_uuid")?),
            kind: kind
                .parse()
                .map_err(|error| column_decode_error("kind", error))?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            image: row.try_get("image")?,
            dimensions: inner_width
                .zip(inner_height)
                .map(|(width, height)| InnerDimensions { width, height }),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
