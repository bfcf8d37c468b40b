//! List Customers Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    principals::{errors::into_status_error, models::PrincipalResponse},
    state::State,
};

/// List Customers Handler
#[endpoint(
    tags("users"),
    summary = "List Customers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Every customer"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<PrincipalResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customers = state
        .app
        .principals
        .list_customers(depot.principal())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customers.into_iter().map(PrincipalResponse::from).collect()))
}
