//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    auth::{
        errors::{AuthServiceError, RegistrationError},
        records::{
            ApiTokenRecord, ApiTokenUuid, IssuedApiToken, NewApiToken, Registered, Registration,
        },
        repository::{ApiTokensRepository, PgApiTokensRepository},
        token::{
            ApiTokenSecret, ApiTokenVersion, format_api_token, parse_api_token, token_verifier,
            verifiers_match,
        },
    },
    database::{Db, StoreError},
    domain::principals::{
        data::NewPrincipal,
        records::{Principal, PrincipalUuid, Role},
        repository::{PgPrincipalsRepository, PrincipalsRepository},
    },
};

#[derive(Clone)]
pub struct PgAuthService {
    tokens: Arc<dyn ApiTokensRepository>,
    principals: Arc<dyn PrincipalsRepository>,
}

impl fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAuthService").finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_repositories(
            Arc::new(PgApiTokensRepository::new(db.clone())),
            Arc::new(PgPrincipalsRepository::new(db)),
        )
    }

    #[must_use]
    pub fn with_repositories(
        tokens: Arc<dyn ApiTokensRepository>,
        principals: Arc<dyn PrincipalsRepository>,
    ) -> Self {
        Self { tokens, principals }
    }

    /// Issue a new API token for a principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::PrincipalNotFound`] for an unknown principal, or a
    /// storage error.
    pub async fn issue_api_token(
        &self,
        principal: PrincipalUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        Ok(self.create_token(principal, expires_at).await?)
    }

    async fn create_token(
        &self,
        principal: PrincipalUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, StoreError> {
        let uuid = ApiTokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let record = self
            .tokens
            .create_api_token(NewApiToken {
                uuid,
                principal_uuid: principal,
                version,
                token_hash: token_verifier(uuid, version, principal, &secret),
                expires_at,
            })
            .await?;

        info!(token_uuid = %uuid, principal_uuid = %principal, "issued api token");

        Ok(IssuedApiToken {
            token: format_api_token(uuid, version, &secret),
            record,
        })
    }

    /// Every token issued to a principal, revoked ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        principal: PrincipalUuid,
    ) -> Result<Vec<ApiTokenRecord>, AuthServiceError> {
        Ok(self.tokens.list_api_tokens(principal).await?)
    }

    /// Revoke a token. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let revoked = self.tokens.revoke_api_token(token).await?;

        if revoked {
            info!(token_uuid = %token, "revoked api token");
        }

        Ok(revoked)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: Registration) -> Result<Registered, RegistrationError> {
        let username = registration.username.trim();
        let email = registration.email.trim();

        if username.is_empty() || email.is_empty() {
            return Err(RegistrationError::InvalidData);
        }

        let principal = self
            .principals
            .create_principal(NewPrincipal {
                uuid: PrincipalUuid::new(),
                username: username.to_string(),
                name: registration.name,
                email: email.to_string(),
                phone: registration.phone,
                role: Role::Customer,
            })
            .await?;

        let token = match self.create_token(principal.uuid, None).await {
            Ok(token) => token,
            Err(error) => {
                if let Err(cleanup) = self.principals.delete_principal(principal.uuid).await {
                    warn!(
                        principal_uuid = %principal.uuid,
                        "failed to remove half-registered principal: {cleanup}"
                    );
                }

                return Err(RegistrationError::Store(error));
            }
        };

        info!(principal_uuid = %principal.uuid, "registered customer");

        Ok(Registered { principal, token })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|error| {
            debug!("rejected malformed bearer token: {error}");

            AuthServiceError::NotFound
        })?;

        let token = self
            .tokens
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = token_verifier(
            parsed.token_uuid,
            parsed.version,
            token.principal_uuid,
            &parsed.secret,
        );

        if !verifiers_match(&token.token_hash, &expected) {
            return Err(AuthServiceError::NotFound);
        }

        let principal = match self.principals.get_principal(token.principal_uuid).await {
            Ok(record) => record.principal(),
            Err(StoreError::NotFound) => return Err(AuthServiceError::NotFound),
            Err(error) => return Err(error.into()),
        };

        if principal.blocked {
            return Err(AuthServiceError::Blocked);
        }

        if let Err(error) = self.tokens.touch_api_token(parsed.token_uuid).await {
            warn!(token_uuid = %parsed.token_uuid, "failed to record token use: {error}");
        }

        Ok(principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Open a customer account and issue its first API token.
    async fn register(&self, registration: Registration) -> Result<Registered, RegistrationError>;

    /// Resolve a bearer token to the principal it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}
