//! API token records.

use jiff::Timestamp;

use crate::{
    auth::token::ApiTokenVersion,
    domain::principals::records::{PrincipalRecord, PrincipalUuid},
    uuids::TypedUuid,
};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenRecord>;

/// Token metadata. The verifier never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenRecord {
    pub uuid: ApiTokenUuid,
    pub principal_uuid: PrincipalUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// The parts of an unrevoked, unexpired token needed to verify a bearer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveApiToken {
    pub principal_uuid: PrincipalUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub principal_uuid: PrincipalUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// A freshly issued token. The raw value is only ever shown once.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub record: ApiTokenRecord,
}

/// Details a visitor supplies to open a customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

/// A new customer and the first token issued to them.
#[derive(Debug, Clone)]
pub struct Registered {
    pub principal: PrincipalRecord,
    pub token: IssuedApiToken,
}
