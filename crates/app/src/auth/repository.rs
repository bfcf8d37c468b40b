//! API token repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::{
        records::{ActiveApiToken, ApiTokenRecord, ApiTokenUuid, NewApiToken},
        token::ApiTokenVersion,
    },
    database::{Db, StoreError, column_decode_error},
    domain::principals::records::PrincipalUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");

#[automock]
#[async_trait]
pub trait ApiTokensRepository: Send + Sync {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenRecord, StoreError>;

    /// The token if it exists with this version and is neither revoked nor expired.
    async fn find_active_api_token(
        &self,
        token: ApiTokenUuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, StoreError>;

    async fn list_api_tokens(
        &self,
        principal: PrincipalUuid,
    ) -> Result<Vec<ApiTokenRecord>, StoreError>;

    /// Returns `true` when an active token was revoked.
    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, StoreError>;

    /// Record a successful authentication.
    async fn touch_api_token(&self, token: ApiTokenUuid) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgApiTokensRepository {
    db: Db,
}

impl PgApiTokensRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApiTokensRepository for PgApiTokensRepository {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenRecord, StoreError> {
        let created = query_as::<Postgres, ApiTokenRecord>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.principal_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn find_active_api_token(
        &self,
        token: ApiTokenUuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, StoreError> {
        let active = query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(version.as_i16())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(active)
    }

    async fn list_api_tokens(
        &self,
        principal: PrincipalUuid,
    ) -> Result<Vec<ApiTokenRecord>, StoreError> {
        let tokens = query_as::<Postgres, ApiTokenRecord>(LIST_API_TOKENS_SQL)
            .bind(principal.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        Ok(tokens)
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, StoreError> {
        let revoked: Option<Uuid> = query_scalar(REVOKE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(revoked.is_some())
    }

    async fn touch_api_token(&self, token: ApiTokenUuid) -> Result<(), StoreError> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

fn try_get_version(row: &PgRow) -> sqlx::Result<ApiTokenVersion> {
    let version: i16 = row.try_get("version")?;

    ApiTokenVersion::try_from(version).map_err(|error| column_decode_error("version", error))
}

fn try_get_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<jiff::Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(|timestamp| timestamp.to_jiff()))
}

impl<'r> FromRow<'r, PgRow> for ApiTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            principal_uuid: PrincipalUuid::from_uuid(row.try_get("principal_uuid")?),
            version: try_get_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: try_get_timestamp(row, "last_used_at")?,
            expires_at: try_get_timestamp(row, "expires_at")?,
            revoked_at: try_get_timestamp(row, "revoked_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            principal_uuid: PrincipalUuid::from_uuid(row.try_get("principal_uuid")?),
            version: try_get_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
