//! Update Order Status Handler

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

use frameshop_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderSummaryResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// `pending`, `confirmed`, `shipped`, `delivered` or `cancelled`
    pub status: String,
}

/// Update Order Status Handler
///
/// Staff only. Orders move forward through confirmed, shipped and delivered,
/// and may be cancelled until shipped.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.status", skip(order, json, depot), err)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = json.into_inner().status.parse::<OrderStatus>().or_400("status")?;

    let updated = state
        .app
        .orders
        .transition_order(depot.principal(), order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %updated.uuid, status = updated.status.as_str(), "changed order status");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use frameshop_app::domain::{
        orders::{OrdersServiceError, records::OrderUuid},
        principals::access::AccessError,
    };

    use crate::test_helpers::{CUSTOMER, EMPLOYEE, MockApp, order};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/{order}/status").put(handler)
    }

    #[tokio::test]
    async fn test_confirm_order_returns_200() -> TestResult {
        let placed = order(CUSTOMER, OrderStatus::Pending);
        let uuid = placed.order.uuid;

        let mut app = MockApp::default();

        app.orders
            .expect_transition_order()
            .once()
            .withf(move |principal, order, status| {
                *principal == Some(EMPLOYEE) && *order == uuid && *status == OrderStatus::Confirmed
            })
            .return_once(move |_, _, status| {
                let mut record = placed.order;
                record.status = status;
                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "confirmed" }))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        let body: OrderSummaryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let res = TestClient::put(format!("http://example.com/orders/{}/status", OrderUuid::new()))
            .json(&json!({ "status": "lost" }))
            .send(&MockApp::default().service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_backwards_transition_returns_409() -> TestResult {
        let mut app = MockApp::default();

        app.orders.expect_transition_order().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Pending,
            })
        });

        let res = TestClient::put(format!("http://example.com/orders/{}/status", OrderUuid::new()))
            .json(&json!({ "status": "pending" }))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_returns_403() -> TestResult {
        let mut app = MockApp::default();

        app.orders
            .expect_transition_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Access(AccessError::Forbidden)));

        let res = TestClient::put(format!("http://example.com/orders/{}/status", OrderUuid::new()))
            .json(&json!({ "status": "cancelled" }))
            .send(&app.service(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
