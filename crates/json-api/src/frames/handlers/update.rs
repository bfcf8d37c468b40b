//! Update Frame Handler

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

use frameshop_app::domain::frames::data::FrameUpdate;

use crate::{
    extensions::*,
    frames::{errors::into_status_error, models::FrameResponse},
    requests::{DimensionsBody, ImageRequest, parse_amount},
    state::State,
};

/// Update Frame Request
///
/// Omitted fields keep their current value. The image can be replaced but not removed.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateFrameRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<ImageRequest>,
    pub dimensions: Option<DimensionsBody>,
}

impl UpdateFrameRequest {
    fn into_update(self) -> Result<FrameUpdate, StatusError> {
        Ok(FrameUpdate {
            name: self.name,
            price: self
                .price
                .map(|price| parse_amount("price", &price))
                .transpose()?,
            image: self.image.map(|image| image.decode("image")).transpose()?,
            dimensions: self.dimensions.map(Into::into),
        })
    }
}

/// Update Frame Handler
#[endpoint(
    tags("frames"),
    summary = "Update Frame",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Frame updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "frames.update", skip(frame, json, depot), err)]
pub(crate) async fn handler(
    frame: PathParam<Uuid>,
    json: JsonBody<UpdateFrameRequest>,
    depot: &mut Depot,
) -> Result<Json<FrameResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let details = state
        .app
        .frames
        .update_frame(depot.principal(), frame.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(frame_uuid = %details.frame.uuid, "updated frame");

    Ok(Json(details.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use frameshop_app::domain::frames::{FramesServiceError, records::FrameUuid};

    use crate::test_helpers::{EMPLOYEE, MockApp, frame_details};

    use super::*;

    fn route() -> Router {
        Router::with_path("frames/{frame}").put(handler)
    }

    #[tokio::test]
    async fn test_update_frame_price_only() -> TestResult {
        let uuid = FrameUuid::new();

        let mut app = MockApp::default();

        app.frames
            .expect_update_frame()
            .once()
            .withf(move |principal, frame, update| {
                *principal == Some(EMPLOYEE)
                    && *frame == uuid
                    && *update
                        == FrameUpdate {
                            price: Some(Decimal::new(3000, 2)),
                            ..FrameUpdate::default()
                        }
            })
            .return_once(move |_, _, _| Ok(frame_details(uuid)));

        let mut res = TestClient::put(format!("http://example.com/frames/{uuid}"))
            .json(&json!({ "price": "30.00" }))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        let body: FrameResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_frame_with_invalid_price_returns_400() -> TestResult {
        let uuid = FrameUuid::new();

        let mut app = MockApp::default();

        app.frames.expect_update_frame().once().return_once(|_, _, _| {
            Err(FramesServiceError::InvalidPrice(
                frameshop_app::domain::pricing::InvalidPrice {
                    price: Decimal::new(-1, 0),
                },
            ))
        });

        let res = TestClient::put(format!("http://example.com/frames/{uuid}"))
            .json(&json!({ "price": "-1" }))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_frame_returns_404() -> TestResult {
        let mut app = MockApp::default();

        app.frames
            .expect_update_frame()
            .once()
            .return_once(|_, _, _| Err(FramesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/frames/{}", FrameUuid::new()))
            .json(&json!({ "name": "Walnut" }))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
