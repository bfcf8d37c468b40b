//! Principal Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::principals::records::PrincipalRecord;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PrincipalResponse {
    pub uuid: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// `customer`, `employee` or `admin`
    pub role: String,
    pub blocked: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PrincipalRecord> for PrincipalResponse {
    fn from(record: PrincipalRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            username: record.username,
            name: record.name,
            email: record.email,
            phone: record.phone,
            role: record.role.as_str().to_string(),
            blocked: record.blocked,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Registration Response
///
/// `token` is shown once; only its verifier is stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub user: PrincipalResponse,
    pub token: String,
}
