//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use frameshop_app::auth::records::Registration;

use crate::{
    extensions::*,
    principals::{errors::registration_error, models::RegisteredResponse},
    state::State,
};

/// Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: request.username,
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Register Handler
///
/// Opens a customer account and returns its first API token.
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Username already taken"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "principals.register", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let registered = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(registration_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(principal_uuid = %registered.principal.uuid, "registered customer");

    Ok(Json(RegisteredResponse {
        user: registered.principal.into(),
        token: registered.token.token,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use frameshop_app::{
        auth::{
            RegistrationError,
            records::{ApiTokenRecord, ApiTokenUuid, IssuedApiToken, Registered},
            token::ApiTokenVersion,
        },
        domain::principals::records::Role,
    };

    use crate::test_helpers::{CUSTOMER, MockApp, principal_record};

    use super::*;

    fn route() -> Router {
        Router::with_path("register").post(handler)
    }

    fn registered(username: &str) -> Registered {
        Registered {
            principal: principal_record(CUSTOMER, username),
            token: IssuedApiToken {
                token: "fs1_token".to_string(),
                record: ApiTokenRecord {
                    uuid: ApiTokenUuid::new(),
                    principal_uuid: CUSTOMER.uuid,
                    version: ApiTokenVersion::V1,
                    created_at: Timestamp::UNIX_EPOCH,
                    last_used_at: None,
                    expires_at: None,
                    revoked_at: None,
                },
            },
        }
    }

    #[tokio::test]
    async fn test_anonymous_visitor_registers_and_gets_a_token() -> TestResult {
        let mut app = MockApp::default();

        app.auth
            .expect_register()
            .once()
            .withf(|registration| {
                *registration
                    == Registration {
                        username: "ada".to_string(),
                        name: None,
                        email: "ada@example.com".to_string(),
                        phone: Some("555-0100".to_string()),
                    }
            })
            .return_once(|_| Ok(registered("ada")));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({
                "username": "ada",
                "email": "ada@example.com",
                "phone": "555-0100",
            }))
            .send(&app.service(None, route()))
            .await;

        let body: RegisteredResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.user.username, "ada");
        assert_eq!(body.user.role, Role::Customer.as_str());
        assert_eq!(body.token, "fs1_token");

        Ok(())
    }

    #[tokio::test]
    async fn test_taken_username_returns_409() -> TestResult {
        let mut app = MockApp::default();

        app.auth
            .expect_register()
            .once()
            .return_once(|_| Err(RegistrationError::UsernameTaken));

        let res = TestClient::post("http://example.com/register")
            .json(&json!({ "username": "ada", "email": "ada@example.com" }))
            .send(&app.service(None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_username_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.auth
            .expect_register()
            .once()
            .return_once(|_| Err(RegistrationError::InvalidData));

        let res = TestClient::post("http://example.com/register")
            .json(&json!({ "username": " ", "email": "ada@example.com" }))
            .send(&app.service(None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
