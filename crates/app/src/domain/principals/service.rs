//! Principals service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    blobs::{self, BlobStore},
    database::Db,
    domain::principals::{
        access::authorize,
        data::{NewPrincipal, PrincipalUpdate},
        errors::PrincipalsServiceError,
        records::{Principal, PrincipalRecord, PrincipalUuid, Role},
        repository::{PgPrincipalsRepository, PrincipalsRepository},
    },
};

#[derive(Clone)]
pub struct PgPrincipalsService {
    repository: Arc<dyn PrincipalsRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for PgPrincipalsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPrincipalsService").finish_non_exhaustive()
    }
}

impl PgPrincipalsService {
    #[must_use]
    pub fn new(db: Db, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_repository(Arc::new(PgPrincipalsRepository::new(db)), blobs)
    }

    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn PrincipalsRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self { repository, blobs }
    }
}

#[async_trait]
impl PrincipalsService for PgPrincipalsService {
    async fn create_principal(
        &self,
        principal: NewPrincipal,
    ) -> Result<PrincipalRecord, PrincipalsServiceError> {
        if principal.username.trim().is_empty() || principal.email.trim().is_empty() {
            return Err(PrincipalsServiceError::InvalidData);
        }

        let created = self.repository.create_principal(principal).await?;

        info!(
            principal_uuid = %created.uuid,
            role = %created.role,
            "created principal"
        );

        Ok(created)
    }

    async fn get_principal(
        &self,
        principal: PrincipalUuid,
    ) -> Result<PrincipalRecord, PrincipalsServiceError> {
        Ok(self.repository.get_principal(principal).await?)
    }

    async fn current(
        &self,
        principal: Option<Principal>,
    ) -> Result<PrincipalRecord, PrincipalsServiceError> {
        let principal = authorize(principal)?;

        Ok(self.repository.get_principal(principal.uuid).await?)
    }

    async fn list_customers(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<PrincipalRecord>, PrincipalsServiceError> {
        authorize(principal)?.ensure_admin()?;

        Ok(self.repository.list_principals(Some(Role::Customer)).await?)
    }

    async fn update_principal(
        &self,
        principal: Option<Principal>,
        target: PrincipalUuid,
        update: PrincipalUpdate,
    ) -> Result<PrincipalRecord, PrincipalsServiceError> {
        authorize(principal)?.ensure_admin()?;

        let mut record = self.repository.get_principal(target).await?;

        if let Some(email) = update.email {
            if email.trim().is_empty() {
                return Err(PrincipalsServiceError::InvalidData);
            }

            record.email = email;
        }

        record.name = update.name.apply(record.name);
        record.phone = update.phone.apply(record.phone);

        if let Some(role) = update.role {
            record.role = role;
        }

        if let Some(blocked) = update.blocked {
            record.blocked = blocked;
        }

        let updated = self.repository.update_principal(record).await?;

        info!(
            principal_uuid = %updated.uuid,
            role = %updated.role,
            blocked = updated.blocked,
            "updated principal"
        );

        Ok(updated)
    }

    async fn delete_principal(
        &self,
        principal: Option<Principal>,
        target: PrincipalUuid,
    ) -> Result<(), PrincipalsServiceError> {
        authorize(principal)?.ensure_admin()?;

        let images = self.repository.delete_principal(target).await?;

        blobs::release(self.blobs.as_ref(), images).await;

        info!(principal_uuid = %target, "deleted principal");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PrincipalsService: Send + Sync {
    /// Create a principal. Used by the admin CLI, not exposed over HTTP.
    async fn create_principal(
        &self,
        principal: NewPrincipal,
    ) -> Result<PrincipalRecord, PrincipalsServiceError>;

    /// Load a principal without access checks, for authentication.
    async fn get_principal(
        &self,
        principal: PrincipalUuid,
    ) -> Result<PrincipalRecord, PrincipalsServiceError>;

    /// The caller's own profile.
    async fn current(
        &self,
        principal: Option<Principal>,
    ) -> Result<PrincipalRecord, PrincipalsServiceError>;

    async fn list_customers(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<PrincipalRecord>, PrincipalsServiceError>;

    async fn update_principal(
        &self,
        principal: Option<Principal>,
        target: PrincipalUuid,
        update: PrincipalUpdate,
    ) -> Result<PrincipalRecord, PrincipalsServiceError>;

    /// Delete a principal, its cart and its orders, releasing their images.
    async fn delete_principal(
        &self,
        principal: Option<Principal>,
        target: PrincipalUuid,
    ) -> Result<(), PrincipalsServiceError>;
}
