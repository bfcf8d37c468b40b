//! Principals Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{Db, StoreError, column_decode_error},
    domain::principals::{
        data::NewPrincipal,
        records::{PrincipalRecord, PrincipalUuid, Role},
    },
};

const CREATE_PRINCIPAL_SQL: &str = include_str!("sql/create_principal.sql");
const GET_PRINCIPAL_SQL: &str = include_str!("sql/get_principal.sql");
const LIST_PRINCIPALS_SQL: &str = include_str!("sql/list_principals.sql");
const UPDATE_PRINCIPAL_SQL: &str = include_str!("sql/update_principal.sql");
const LIST_PRINCIPAL_IMAGES_SQL: &str = include_str!("sql/list_principal_images.sql");
const DELETE_PRINCIPAL_SQL: &str = include_str!("sql/delete_principal.sql");

#[automock]
#[async_trait]
pub trait PrincipalsRepository: Send + Sync {
    async fn create_principal(&self, principal: NewPrincipal)
    -> Result<PrincipalRecord, StoreError>;

    async fn get_principal(&self, principal: PrincipalUuid)
    -> Result<PrincipalRecord, StoreError>;

    /// Principals in creation order, optionally restricted to one role.
    async fn list_principals(&self, role: Option<Role>)
    -> Result<Vec<PrincipalRecord>, StoreError>;

    /// Persist every mutable field of `principal`.
    async fn update_principal(
        &self,
        principal: PrincipalRecord,
    ) -> Result<PrincipalRecord, StoreError>;

    /// Delete a principal together with its cart and orders.
    ///
    /// Returns the blob paths that belonged to the deleted rows.
    async fn delete_principal(&self, principal: PrincipalUuid) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgPrincipalsRepository {
    db: Db,
}

impl PgPrincipalsRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalsRepository for PgPrincipalsRepository {
    async fn create_principal(
        &self,
        principal: NewPrincipal,
    ) -> Result<PrincipalRecord, StoreError> {
        let created = query_as::<Postgres, PrincipalRecord>(CREATE_PRINCIPAL_SQL)
            .bind(principal.uuid.into_uuid())
            .bind(principal.username)
            .bind(principal.name)
            .bind(principal.email)
            .bind(principal.phone)
            .bind(principal.role.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn get_principal(
        &self,
        principal: PrincipalUuid,
    ) -> Result<PrincipalRecord, StoreError> {
        let record = query_as::<Postgres, PrincipalRecord>(GET_PRINCIPAL_SQL)
            .bind(principal.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn list_principals(
        &self,
        role: Option<Role>,
    ) -> Result<Vec<PrincipalRecord>, StoreError> {
        let records = query_as::<Postgres, PrincipalRecord>(LIST_PRINCIPALS_SQL)
            .bind(role.map(Role::as_str))
            .fetch_all(self.db.pool())
            .await?;

        Ok(records)
    }

    async fn update_principal(
        &self,
        principal: PrincipalRecord,
    ) -> Result<PrincipalRecord, StoreError> {
        let updated = query_as::<Postgres, PrincipalRecord>(UPDATE_PRINCIPAL_SQL)
            .bind(principal.uuid.into_uuid())
            .bind(principal.name)
            .bind(principal.email)
            .bind(principal.phone)
            .bind(principal.role.as_str())
            .bind(principal.blocked)
            .fetch_one(self.db.pool())
            .await?;

        Ok(updated)
    }

    async fn delete_principal(&self, principal: PrincipalUuid) -> Result<Vec<String>, StoreError> {
        let mut tx = self.db.begin_transaction().await?;

        let images: Vec<String> = query_scalar(LIST_PRINCIPAL_IMAGES_SQL)
            .bind(principal.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        let rows_affected = query(DELETE_PRINCIPAL_SQL)
            .bind(principal.into_uuid())
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

impl<'r> FromRow<'r, PgRow> for PrincipalRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: PrincipalUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            role: role
                .parse()
                .map_err(|error| column_decode_error("role", error))?,
            blocked: row.try_get("blocked")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
