//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{errors::into_status_error, items::requests::AddCartItemRequest, models::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Handler
///
/// Commits a composed item to the cart. Every selected variant must belong to
/// the chosen frame and both the original and adjusted images must be given.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Variant mismatch, missing image or invalid payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "Frame or variant not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart_items.create",
    skip(json, depot, res),
    fields(frame_uuid = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let draft = json.into_inner().into_draft()?;

    let span = tracing::Span::current();

    span.record("frame_uuid", tracing::field::display(draft.frame));
    span.record("quantity", draft.quantity.get());

    let item = state
        .app
        .carts
        .add_item(depot.principal(), draft)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(cart_item_uuid = %item.uuid, total_price = %item.total_price, "added cart item");

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use smallvec::smallvec;
    use testresult::TestResult;

    use frameshop_app::domain::{
        carts::{
            CartsServiceError,
            data::{ImageSource, MissingRequiredImage},
            records::{CartUuid, ImageRole},
        },
        frames::records::FrameUuid,
        pricing::{AmountTooLarge, VariantMismatch},
        variants::records::{VariantKind, VariantUuid},
    };

    use crate::test_helpers::{CUSTOMER, MockApp, cart_item_record};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/items").post(handler)
    }

    #[tokio::test]
    async fn test_add_item_returns_201() -> TestResult {
        let frame = FrameUuid::new();
        let color = VariantUuid::new();

        let mut app = MockApp::default();

        app.carts
            .expect_add_item()
            .once()
            .withf(move |principal, draft| {
                *principal == Some(CUSTOMER)
                    && draft.frame == frame
                    && draft.variants.color == Some(color)
                    && draft.quantity.get() == 2
                    && draft.original_image
                        == Some(ImageSource::Stored("cart/original/a.png".to_string()))
                    && matches!(draft.adjusted_image, Some(ImageSource::Upload(_)))
            })
            .return_once(move |_, draft| {
                let mut item = cart_item_record(CartUuid::new(), frame);
                item.uuid = draft.uuid;
                Ok(item)
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "frame": frame.into_uuid(),
                "color_variant": color.into_uuid(),
                "quantity": 2,
                "original_image": { "path": "cart/original/a.png" },
                "adjusted_image": { "filename": "adjusted.png", "data": STANDARD.encode([1, 2]) },
            }))
            .send(&app.service(Some(CUSTOMER), route()))
            .await;

        let body: CartItemResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/cart/items/{}", body.uuid).as_str()));
        assert_eq!(body.frame_uuid, frame.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_variant_of_another_frame_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.carts.expect_add_item().once().return_once(|_, _| {
            Err(CartsServiceError::VariantMismatch(VariantMismatch {
                dimension: VariantKind::Color,
            }))
        });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "frame": FrameUuid::new().into_uuid(),
                "color_variant": VariantUuid::new().into_uuid(),
                "original_image": { "path": "cart/original/a.png" },
                "adjusted_image": { "path": "cart/adjusted/a.png" },
            }))
            .send(&app.service(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_line_total_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.carts
            .expect_add_item()
            .once()
            .withf(|_, draft| draft.quantity.get() == 2_000_000)
            .return_once(|_, _| Err(CartsServiceError::TotalTooLarge(AmountTooLarge)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "frame": FrameUuid::new().into_uuid(),
                "quantity": 2_000_000,
                "original_image": { "path": "cart/original/a.png" },
                "adjusted_image": { "path": "cart/adjusted/a.png" },
            }))
            .send(&app.service(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_adjusted_image_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.carts
            .expect_add_item()
            .once()
            .withf(|_, draft| draft.adjusted_image.is_none())
            .return_once(|_, _| {
                Err(CartsServiceError::MissingRequiredImage(MissingRequiredImage {
                    missing: smallvec![ImageRole::Adjusted],
                }))
            });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "frame": FrameUuid::new().into_uuid(),
                "original_image": { "path": "cart/original/a.png" },
            }))
            .send(&app.service(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_image_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "frame": FrameUuid::new().into_uuid(),
                "original_image": { "filename": "a.png", "data": "%%%" },
                "adjusted_image": { "path": "cart/adjusted/a.png" },
            }))
            .send(&MockApp::default().service(Some(CUSTOMER), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
