//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frameshop_app::domain::principals::{data::PrincipalUpdate, records::Role};

use crate::{
    extensions::*,
    principals::{errors::into_status_error, models::PrincipalResponse},
    requests::double_option,
    state::State,
};

/// Update User Request
///
/// Omitted fields keep their value; `null` clears `name` or `phone`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePrincipalRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    /// `customer`, `employee` or `admin`
    pub role: Option<String>,
    pub blocked: Option<bool>,
}

impl UpdatePrincipalRequest {
    fn into_update(self) -> Result<PrincipalUpdate, StatusError> {
        Ok(PrincipalUpdate {
            role: self
                .role
                .map(|role| role.parse::<Role>())
                .transpose()
                .or_400("role")?,
            name: self.name.into(),
            email: self.email,
            phone: self.phone.into(),
            blocked: self.blocked,
        })
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "principals.update", skip(principal, json, depot), err)]
pub(crate) async fn handler(
    principal: PathParam<Uuid>,
    json: JsonBody<UpdatePrincipalRequest>,
    depot: &mut Depot,
) -> Result<Json<PrincipalResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let record = state
        .app
        .principals
        .update_principal(depot.principal(), principal.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(principal_uuid = %record.uuid, blocked = record.blocked, "updated user");

    Ok(Json(record.into()))
}
