//! Delete Frame Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, frames::errors::into_status_error, state::State};

/// Delete Frame Handler
///
/// Removes the frame with its variants and any cart items built on it.
#[endpoint(
    tags("frames"),
    summary = "Delete Frame",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Frame deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff only"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    frame: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let frame = frame.into_inner();

    state
        .app
        .frames
        .delete_frame(depot.principal(), frame.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(frame_uuid = %frame, "deleted frame");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use frameshop_app::domain::frames::{FramesServiceError, records::FrameUuid};

    use crate::test_helpers::{EMPLOYEE, MockApp};

    use super::*;

    fn route() -> Router {
        Router::with_path("frames/{frame}").delete(handler)
    }

    #[tokio::test]
    async fn test_delete_frame_returns_204() -> TestResult {
        let uuid = FrameUuid::new();

        let mut app = MockApp::default();

        app.frames
            .expect_delete_frame()
            .once()
            .withf(move |principal, frame| *principal == Some(EMPLOYEE) && *frame == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/frames/{uuid}"))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_frame_returns_404() -> TestResult {
        let mut app = MockApp::default();

        app.frames
            .expect_delete_frame()
            .once()
            .return_once(|_, _| Err(FramesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/frames/{}", FrameUuid::new()))
            .send(&app.service(Some(EMPLOYEE), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
