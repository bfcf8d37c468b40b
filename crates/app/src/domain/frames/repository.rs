//! Frames Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{Db, StoreError},
    domain::{
        frames::{
            data::NewFrameRecord,
            records::{FrameRecord, FrameUuid, InnerDimensions},
        },
        principals::records::PrincipalUuid,
    },
};

const CREATE_FRAME_SQL: &str = include_str!("sql/create_frame.sql");
const GET_FRAME_SQL: &str = include_str!("sql/get_frame.sql");
const LIST_FRAMES_SQL: &str = include_str!("sql/list_frames.sql");
const UPDATE_FRAME_SQL: &str = include_str!("sql/update_frame.sql");
const LIST_FRAME_IMAGES_SQL: &str = include_str!("sql/list_frame_images.sql");
const DELETE_FRAME_SQL: &str = include_str!("sql/delete_frame.sql");

#[automock]
#[async_trait]
pub trait FramesRepository: Send + Sync {
    async fn create_frame(&self, frame: NewFrameRecord) -> Result<FrameRecord, StoreError>;

    async fn get_frame(&self, frame: FrameUuid) -> Result<FrameRecord, StoreError>;

    /// Every frame, oldest first.
    async fn list_frames(&self) -> Result<Vec<FrameRecord>, StoreError>;

    /// Persist every mutable field of `frame`.
    async fn update_frame(&self, frame: FrameRecord) -> Result<FrameRecord, StoreError>;

    /// Delete a frame together with its variants and the cart items built on it.
    ///
    /// Returns the blob paths that belonged to the deleted rows.
    async fn delete_frame(&self, frame: FrameUuid) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgFramesRepository {
    db: Db,
}

impl PgFramesRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FramesRepository for PgFramesRepository {
    async fn create_frame(&self, frame: NewFrameRecord) -> Result<FrameRecord, StoreError> {
        let created = query_as::<Postgres, FrameRecord>(CREATE_FRAME_SQL)
            .bind(frame.uuid.into_uuid())
            .bind(frame.name)
            .bind(frame.price)
            .bind(frame.image)
            .bind(frame.dimensions.width)
            .bind(frame.dimensions.height)
            .bind(frame.created_by.map(PrincipalUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn get_frame(&self, frame: FrameUuid) -> Result<FrameRecord, StoreError> {
        let record = query_as::<Postgres, FrameRecord>(GET_FRAME_SQL)
            .bind(frame.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn list_frames(&self) -> Result<Vec<FrameRecord>, StoreError> {
        let records = query_as::<Postgres, FrameRecord>(LIST_FRAMES_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(records)
    }

    async fn update_frame(&self, frame: FrameRecord) -> Result<FrameRecord, StoreError> {
        let updated = query_as::<Postgres, FrameRecord>(UPDATE_FRAME_SQL)
            .bind(frame.uuid.into_uuid())
            .bind(frame.name)
            .bind(frame.price)
            .bind(frame.image)
            .bind(frame.dimensions.width)
            .bind(frame.dimensions.height)
            .fetch_one(self.db.pool())
            .await?;

        Ok(updated)
    }

    async fn delete_frame(&self, frame: FrameUuid) -> Result<Vec<String>, StoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let images: Vec<String> = query_scalar(LIST_FRAME_IMAGES_SQL)
            .bind(frame.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        let rows_affected = query(DELETE_FRAME_SQL)
            .bind(frame.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;

        Ok(images)
    }
}

impl<'r> FromRow<'r, PgRow> for FrameRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FrameUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            image: row.try_get("image")?,
            dimensions: InnerDimensions {
                width: row.try_get("inner_width")?,
                height: row.try_get("inner_height")?,
            },
            created_by: row
                .try_get::<Option<Uuid>, _>("created_by")?
                .map(PrincipalUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
