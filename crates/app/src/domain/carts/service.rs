//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    blobs::{self, BlobStore, ImageUpload},
    database::Db,
    domain::{
        carts::{
            data::{CartItemPatch, DraftCartItem, ImageSource, NewCartItemRecord},
            errors::{CartsServiceError, Missing},
            records::{
                Cart, CartItemImages, CartItemRecord, CartItemState, CartItemUuid, CartRecord,
                CartUuid, ImageRole, VariantChoices,
            },
            repositories::{CartsRepository, PgCartsRepository},
        },
        catalog::Catalog,
        frames::{
            records::FrameUuid,
            repository::{FramesRepository, PgFramesRepository},
        },
        pricing::{Quantity, compute_total, validate_ownership},
        principals::{
            access::authorize,
            records::{Principal, PrincipalUuid},
        },
        variants::repository::{PgVariantsRepository, VariantsRepository},
    },
};

#[derive(Clone)]
pub struct PgCartsService {
    catalog: Catalog,
    carts: Arc<dyn CartsRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for PgCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgCartsService").finish_non_exhaustive()
    }
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_repositories(
            Arc::new(PgFramesRepository::new(db.clone())),
            Arc::new(PgVariantsRepository::new(db.clone())),
            Arc::new(PgCartsRepository::new(db)),
            blobs,
        )
    }

    #[must_use]
    pub fn with_repositories(
        frames: Arc<dyn FramesRepository>,
        variants: Arc<dyn VariantsRepository>,
        carts: Arc<dyn CartsRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            catalog: Catalog::new(frames, variants),
            carts,
            blobs,
        }
    }

    async fn cart(&self, principal: &Principal) -> Result<CartRecord, CartsServiceError> {
        Ok(self
            .carts
            .get_or_create_cart(principal.uuid, CartUuid::new())
            .await?)
    }

    /// Load the frame and selections, check they belong together and price the line.
    async fn price(
        &self,
        frame: FrameUuid,
        variants: VariantChoices,
        quantity: Quantity,
    ) -> Result<Decimal, CartsServiceError> {
        let frame = self
            .catalog
            .get_frame(frame)
            .await
            .map_err(CartsServiceError::lookup(Missing::Frame))?;

        let selected = self.catalog.load_selection(variants).await?;
        let selection = selected.selection();

        validate_ownership(&frame, &selection)?;

        Ok(compute_total(&frame, &selection, quantity)?)
    }

    /// Check that a path `principal` uploaded earlier may be attached as `role`.
    async fn claim(
        &self,
        principal: PrincipalUuid,
        role: ImageRole,
        path: &str,
    ) -> Result<(), CartsServiceError> {
        let in_directory = path
            .strip_prefix(role.directory_for(principal).as_str())
            .and_then(|name| name.strip_prefix('/'))
            .is_some_and(|name| !name.is_empty() && !name.contains('/'));

        if !in_directory || self.carts.image_in_use(path.to_string()).await? {
            return Err(CartsServiceError::InvalidImagePath(path.to_string()));
        }

        Ok(())
    }

    /// Resolve every image source to a stored path.
    ///
    /// Returns the resolved images and the paths stored by this call, which the
    /// caller releases if the row cannot be written.
    async fn resolve_images(
        &self,
        principal: PrincipalUuid,
        sources: [(ImageRole, Option<ImageSource>); 3],
    ) -> Result<(CartItemImages, Vec<String>), CartsServiceError> {
        for (role, source) in &sources {
            if let Some(ImageSource::Stored(path)) = source {
                self.claim(principal, *role, path).await?;
            }
        }

        let mut images = CartItemImages::default();
        let mut stored = Vec::new();

        for (role, source) in sources {
            let path = match source {
                Some(ImageSource::Upload(upload)) => {
                    let directory = role.directory_for(principal);

                    match blobs::store(self.blobs.as_ref(), &directory, upload).await {
                        Ok(path) => {
                            stored.push(path.clone());
                            Some(path)
                        }
                        Err(error) => {
                            blobs::release(self.blobs.as_ref(), stored).await;

                            return Err(error.into());
                        }
                    }
                }
                Some(ImageSource::Stored(path)) => Some(path),
                None => None,
            };

            match role {
                ImageRole::Original => images.original = path,
                ImageRole::Cropped => images.cropped = path,
                ImageRole::Adjusted => images.adjusted = path,
            }
        }

        Ok((images, stored))
    }

    async fn upload_image(
        &self,
        principal: Option<Principal>,
        role: ImageRole,
        upload: ImageUpload,
    ) -> Result<String, CartsServiceError> {
        let principal = authorize(principal)?;

        let path =
            blobs::store(self.blobs.as_ref(), &role.directory_for(principal.uuid), upload).await?;

        debug!(
            principal_uuid = %principal.uuid,
            image_role = %role,
            blob_path = %path,
            "uploaded cart image"
        );

        Ok(path)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, principal: Option<Principal>) -> Result<Cart, CartsServiceError> {
        let principal = authorize(principal)?;

        let cart = self.cart(&principal).await?;
        let items = self.carts.list_items(cart.uuid).await?;

        Ok(Cart::new(cart, items))
    }

    async fn add_item(
        &self,
        principal: Option<Principal>,
        draft: DraftCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let principal = authorize(principal)?;

        let item = draft.commit()?;

        if !item.transform.is_valid() {
            return Err(CartsServiceError::InvalidTransform);
        }

        let total_price = self
            .price(item.frame, item.variants, item.quantity)
            .await?;

        let cart = self.cart(&principal).await?;

        let (images, stored) = self
            .resolve_images(
                principal.uuid,
                [
                    (ImageRole::Original, Some(item.original_image)),
                    (ImageRole::Cropped, item.cropped_image),
                    (ImageRole::Adjusted, Some(item.adjusted_image)),
                ],
            )
            .await?;

        let created = self
            .carts
            .create_item(NewCartItemRecord {
                uuid: item.uuid,
                cart_uuid: cart.uuid,
                frame_uuid: item.frame,
                variants: item.variants,
                quantity: item.quantity,
                total_price,
                images,
                transform: item.transform,
            })
            .await;

        let created = match created {
            Ok(created) => created,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), stored).await;

                return Err(error.into());
            }
        };

        info!(
            cart_item_uuid = %created.uuid,
            frame_uuid = %created.frame_uuid,
            principal_uuid = %principal.uuid,
            quantity = created.quantity.get(),
            total_price = %created.total_price,
            "added cart item"
        );

        Ok(created)
    }

    async fn update_item(
        &self,
        principal: Option<Principal>,
        item: CartItemUuid,
        patch: CartItemPatch,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let principal = authorize(principal)?;

        let cart = self.cart(&principal).await?;

        let mut record = self
            .carts
            .get_item(cart.uuid, item)
            .await
            .map_err(CartsServiceError::lookup(Missing::CartItem))?;

        record.variants = patch.apply_variants(record.variants);
        record.transform = patch.transform.apply(record.transform);

        if let Some(frame) = patch.frame {
            record.frame_uuid = frame;
        }

        if let Some(quantity) = patch.quantity {
            record.quantity = quantity;
        }

        if !record.transform.is_valid() {
            return Err(CartsServiceError::InvalidTransform);
        }

        record.total_price = self
            .price(record.frame_uuid, record.variants, record.quantity)
            .await?;
        record.state = CartItemState::Updated;

        let (stored, replaced) = match patch.adjusted_image {
            Some(upload) => {
                let directory = ImageRole::Adjusted.directory_for(principal.uuid);
                let stored = blobs::store(self.blobs.as_ref(), &directory, upload).await?;

                (Some(stored.clone()), record.images.adjusted.replace(stored))
            }
            None => (None, None),
        };

        let updated = match self.carts.update_item(record).await {
            Ok(updated) => updated,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), stored).await;

                return Err(CartsServiceError::lookup(Missing::CartItem)(error));
            }
        };

        blobs::release(self.blobs.as_ref(), replaced).await;

        info!(
            cart_item_uuid = %updated.uuid,
            frame_uuid = %updated.frame_uuid,
            principal_uuid = %principal.uuid,
            quantity = updated.quantity.get(),
            total_price = %updated.total_price,
            "updated cart item"
        );

        Ok(updated)
    }

    async fn remove_item(
        &self,
        principal: Option<Principal>,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let principal = authorize(principal)?;

        let cart = self.cart(&principal).await?;

        let deleted = self
            .carts
            .delete_item(cart.uuid, item)
            .await
            .map_err(CartsServiceError::lookup(Missing::CartItem))?;

        blobs::release(self.blobs.as_ref(), deleted.images.into_paths()).await;

        info!(
            cart_item_uuid = %item,
            principal_uuid = %principal.uuid,
            "removed cart item"
        );

        Ok(())
    }

    async fn upload_original_image(
        &self,
        principal: Option<Principal>,
        upload: ImageUpload,
    ) -> Result<String, CartsServiceError> {
        self.upload_image(principal, ImageRole::Original, upload)
            .await
    }

    async fn upload_cropped_image(
        &self,
        principal: Option<Principal>,
        upload: ImageUpload,
    ) -> Result<String, CartsServiceError> {
        self.upload_image(principal, ImageRole::Cropped, upload)
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The caller's cart, created on first access, with its subtotal.
    async fn get_cart(&self, principal: Option<Principal>) -> Result<Cart, CartsServiceError>;

    /// Commit a draft into the caller's cart.
    ///
    /// Nothing is persisted unless the draft carries both required images, every
    /// selected variant belongs to the frame and the item row is written.
    async fn add_item(
        &self,
        principal: Option<Principal>,
        draft: DraftCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Apply a partial update to one of the caller's items.
    ///
    /// All selections are re-checked against the resulting frame and the total
    /// is recomputed, whatever the patch touches.
    async fn update_item(
        &self,
        principal: Option<Principal>,
        item: CartItemUuid,
        patch: CartItemPatch,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Delete one of the caller's items and release its images.
    async fn remove_item(
        &self,
        principal: Option<Principal>,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    async fn upload_original_image(
        &self,
        principal: Option<Principal>,
        upload: ImageUpload,
    ) -> Result<String, CartsServiceError>;

    async fn upload_cropped_image(
        &self,
        principal: Option<Principal>,
        upload: ImageUpload,
    ) -> Result<String, CartsServiceError>;
}
