//! Cart Repositories

mod carts;
mod items;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, StoreError},
    domain::{
        carts::{
            data::NewCartItemRecord,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        principals::records::PrincipalUuid,
    },
};

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// The principal's cart, created with `cart` as its UUID when it does not exist yet.
    async fn get_or_create_cart(
        &self,
        principal: PrincipalUuid,
        cart: CartUuid,
    ) -> Result<CartRecord, StoreError>;

    /// Items of a cart in insertion order.
    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemRecord>, StoreError>;

    /// An item, only if it belongs to `cart`.
    async fn get_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, StoreError>;

    async fn create_item(&self, item: NewCartItemRecord) -> Result<CartItemRecord, StoreError>;

    /// Persist every mutable field of `item`.
    async fn update_item(&self, item: CartItemRecord) -> Result<CartItemRecord, StoreError>;

    /// Delete an item of `cart`, returning the deleted row.
    async fn delete_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, StoreError>;

    /// Whether any cart item references the blob at `path`.
    async fn image_in_use(&self, path: String) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgCartsRepository {
    db: Db,
}

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn get_or_create_cart(
        &self,
        principal: PrincipalUuid,
        cart: CartUuid,
    ) -> Result<CartRecord, StoreError> {
        Ok(carts::get_or_create_cart(self.db.pool(), principal, cart).await?)
    }

    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemRecord>, StoreError> {
        Ok(items::list_cart_items(self.db.pool(), cart).await?)
    }

    async fn get_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, StoreError> {
        Ok(items::get_cart_item(self.db.pool(), cart, item).await?)
    }

    async fn create_item(&self, item: NewCartItemRecord) -> Result<CartItemRecord, StoreError> {
        Ok(items::create_cart_item(self.db.pool(), item).await?)
    }

    async fn update_item(&self, item: CartItemRecord) -> Result<CartItemRecord, StoreError> {
        Ok(items::update_cart_item(self.db.pool(), item).await?)
    }

    async fn delete_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, StoreError> {
        Ok(items::delete_cart_item(self.db.pool(), cart, item).await?)
    }

    async fn image_in_use(&self, path: String) -> Result<bool, StoreError> {
        Ok(items::image_in_use(self.db.pool(), &path).await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::records::{CartItemImages, CartItemState, Transform, VariantChoices},
            frames::{
                data::NewFrameRecord,
                records::{FrameUuid, InnerDimensions},
                repository::{FramesRepository, PgFramesRepository},
            },
            pricing::Quantity,
            principals::{
                data::NewPrincipal,
                records::Role,
                repository::{PgPrincipalsRepository, PrincipalsRepository},
            },
            variants::{
                data::NewVariant,
                records::{VariantKind, VariantUuid},
                repository::{PgVariantsRepository, VariantsRepository},
            },
        },
        test::db::TestDb,
    };

    use super::*;

    struct Fixture {
        _test_db: TestDb,
        carts: PgCartsRepository,
        variants: PgVariantsRepository,
        principal: PrincipalUuid,
        frame: FrameUuid,
    }

    async fn fixture() -> Result<Fixture, StoreError> {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let principal = PgPrincipalsRepository::new(db.clone())
            .create_principal(NewPrincipal {
                uuid: PrincipalUuid::new(),
                username: "shopper".to_string(),
                name: None,
                email: "shopper@example.com".to_string(),
                phone: None,
                role: Role::Customer,
            })
            .await?;

        let frame = PgFramesRepository::new(db.clone())
            .create_frame(NewFrameRecord {
                uuid: FrameUuid::new(),
                name: "Oak".to_string(),
                price: Decimal::new(1000, 2),
                image: "frames/oak.png".to_string(),
                dimensions: InnerDimensions {
                    width: 20.0,
                    height: 30.0,
                },
                created_by: None,
            })
            .await?;

        Ok(Fixture {
            _test_db: test_db,
            carts: PgCartsRepository::new(db.clone()),
            variants: PgVariantsRepository::new(db),
            principal: principal.uuid,
            frame: frame.uuid,
        })
    }

    fn new_item(cart: CartUuid, frame: FrameUuid, variants: VariantChoices) -> NewCartItemRecord {
        NewCartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: cart,
            frame_uuid: frame,
            variants,
            quantity: Quantity::ONE,
            total_price: Decimal::new(1250, 2),
            images: CartItemImages {
                original: Some("cart/original/a.png".to_string()),
                cropped: None,
                adjusted: Some("cart/adjusted/a.png".to_string()),
            },
            transform: Transform::default(),
        }
    }

    #[tokio::test]
    async fn get_or_create_cart_is_idempotent() -> TestResult {
        let fixture = fixture().await?;

        let first = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        let second = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        assert_eq!(first.uuid, second.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn created_item_round_trips() -> TestResult {
        let fixture = fixture().await?;
        let cart = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        let created = fixture
            .carts
            .create_item(new_item(cart.uuid, fixture.frame, VariantChoices::default()))
            .await?;

        assert_eq!(created.state, CartItemState::Committed);
        assert_eq!(created.total_price.to_string(), "12.50");
        assert_eq!(fixture.carts.list_items(cart.uuid).await?, vec![created.clone()]);
        assert!(
            fixture
                .carts
                .image_in_use("cart/adjusted/a.png".to_string())
                .await?
        );

        Ok(())
    }

    #[tokio::test]
    async fn item_of_another_cart_is_not_found() -> TestResult {
        let fixture = fixture().await?;
        let cart = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        let created = fixture
            .carts
            .create_item(new_item(cart.uuid, fixture.frame, VariantChoices::default()))
            .await?;

        let result = fixture.carts.get_item(CartUuid::new(), created.uuid).await;

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_variant_clears_the_selection() -> TestResult {
        let fixture = fixture().await?;
        let cart = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        let color = fixture
            .variants
            .create_variant(NewVariant {
                uuid: VariantUuid::new(),
                frame_uuid: fixture.frame,
                kind: VariantKind::Color,
                name: "Red".to_string(),
                price: Decimal::new(250, 2),
                image: None,
                dimensions: None,
            })
            .await?;

        let created = fixture
            .carts
            .create_item(new_item(
                cart.uuid,
                fixture.frame,
                VariantChoices {
                    color: Some(color.uuid),
                    ..VariantChoices::default()
                },
            ))
            .await?;

        fixture.variants.delete_variant(color.uuid).await?;

        let item = fixture.carts.get_item(cart.uuid, created.uuid).await?;

        assert_eq!(item.variants.color, None);

        Ok(())
    }

    #[tokio::test]
    async fn second_delete_is_not_found() -> TestResult {
        let fixture = fixture().await?;
        let cart = fixture
            .carts
            .get_or_create_cart(fixture.principal, CartUuid::new())
            .await?;

        let created = fixture
            .carts
            .create_item(new_item(cart.uuid, fixture.frame, VariantChoices::default()))
            .await?;

        fixture.carts.delete_item(cart.uuid, created.uuid).await?;

        let result = fixture.carts.delete_item(cart.uuid, created.uuid).await;

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
