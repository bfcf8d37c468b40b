//! Frames service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    blobs::{self, BlobStore},
    database::Db,
    domain::{
        frames::{
            data::{FrameUpdate, NewFrame, NewFrameRecord},
            errors::FramesServiceError,
            records::{FrameDetails, FrameUuid},
            repository::{FramesRepository, PgFramesRepository},
        },
        pricing::validate_price,
        principals::{access::authorize, records::Principal},
        variants::repository::{PgVariantsRepository, VariantsRepository},
    },
};

const FRAME_IMAGE_DIRECTORY: &str = "frames";

#[derive(Clone)]
pub struct PgFramesService {
    frames: Arc<dyn FramesRepository>,
    variants: Arc<dyn VariantsRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for PgFramesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgFramesService").finish_non_exhaustive()
    }
}

impl PgFramesService {
    #[must_use]
    pub fn new(db: Db, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_repositories(
            Arc::new(PgFramesRepository::new(db.clone())),
            Arc::new(PgVariantsRepository::new(db)),
            blobs,
        )
    }

    #[must_use]
    pub fn with_repositories(
        frames: Arc<dyn FramesRepository>,
        variants: Arc<dyn VariantsRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            frames,
            variants,
            blobs,
        }
    }

    async fn details(&self, frame: FrameUuid) -> Result<FrameDetails, FramesServiceError> {
        let record = self.frames.get_frame(frame).await?;
        let variants = self.variants.list_variants(vec![frame]).await?;

        Ok(FrameDetails::new(record, variants))
    }
}

#[async_trait]
impl FramesService for PgFramesService {
    async fn list_frames(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<FrameDetails>, FramesServiceError> {
        if let Some(principal) = principal {
            principal.ensure_active()?;
        }

        let frames = self.frames.list_frames().await?;
        let uuids = frames.iter().map(|frame| frame.uuid).collect();
        let variants = self.variants.list_variants(uuids).await?;

        Ok(frames
            .into_iter()
            .map(|frame| FrameDetails::new(frame, variants.iter().cloned()))
            .collect())
    }

    async fn get_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
    ) -> Result<FrameDetails, FramesServiceError> {
        authorize(principal)?;

        self.details(frame).await
    }

    async fn create_frame(
        &self,
        principal: Option<Principal>,
        frame: NewFrame,
    ) -> Result<FrameDetails, FramesServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let name = frame.name.trim().to_string();

        if name.is_empty() || !frame.dimensions.is_valid() {
            return Err(FramesServiceError::InvalidData);
        }

        let price = validate_price(frame.price)?;

        let image = blobs::store(self.blobs.as_ref(), FRAME_IMAGE_DIRECTORY, frame.image).await?;

        let created = self
            .frames
            .create_frame(NewFrameRecord {
                uuid: frame.uuid,
                name,
                price,
                image: image.clone(),
                dimensions: frame.dimensions,
                created_by: Some(principal.uuid),
            })
            .await;

        let created = match created {
            Ok(created) => created,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), [image]).await;

                return Err(error.into());
            }
        };

        info!(
            frame_uuid = %created.uuid,
            principal_uuid = %principal.uuid,
            price = %created.price,
            "created frame"
        );

        Ok(FrameDetails::new(created, []))
    }

    async fn update_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        update: FrameUpdate,
    ) -> Result<FrameDetails, FramesServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let mut record = self.frames.get_frame(frame).await?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();

            if name.is_empty() {
                return Err(FramesServiceError::InvalidData);
            }

            record.name = name;
        }

        if let Some(price) = update.price {
            record.price = validate_price(price)?;
        }

        if let Some(dimensions) = update.dimensions {
            if !dimensions.is_valid() {
                return Err(FramesServiceError::InvalidData);
            }

            record.dimensions = dimensions;
        }

        let replaced_image = match update.image {
            Some(upload) => {
                let stored =
                    blobs::store(self.blobs.as_ref(), FRAME_IMAGE_DIRECTORY, upload).await?;

                Some(std::mem::replace(&mut record.image, stored))
            }
            None => None,
        };

        let new_image = record.image.clone();

        match self.frames.update_frame(record).await {
            Ok(_) => {
                blobs::release(self.blobs.as_ref(), replaced_image).await;
            }
            Err(error) => {
                if replaced_image.is_some() {
                    blobs::release(self.blobs.as_ref(), [new_image]).await;
                }

                return Err(error.into());
            }
        }

        info!(frame_uuid = %frame, principal_uuid = %principal.uuid, "updated frame");

        self.details(frame).await
    }

    async fn delete_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
    ) -> Result<(), FramesServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let images = self.frames.delete_frame(frame).await?;

        blobs::release(self.blobs.as_ref(), images).await;

        info!(frame_uuid = %frame, principal_uuid = %principal.uuid, "deleted frame");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait FramesService: Send + Sync {
    /// Every frame with its variants. Anonymous callers may browse the catalog.
    async fn list_frames(
        &self,
        principal: Option<Principal>,
    ) -> Result<Vec<FrameDetails>, FramesServiceError>;

    /// A single frame with its variants.
    async fn get_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
    ) -> Result<FrameDetails, FramesServiceError>;

    /// Create a frame, storing its image. Staff only.
    async fn create_frame(
        &self,
        principal: Option<Principal>,
        frame: NewFrame,
    ) -> Result<FrameDetails, FramesServiceError>;

    /// Apply a partial update. A replaced image is deleted once the update is stored.
    async fn update_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        update: FrameUpdate,
    ) -> Result<FrameDetails, FramesServiceError>;

    /// Delete a frame with its variants and dependent cart items, releasing their images.
    async fn delete_frame(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
    ) -> Result<(), FramesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        blobs::{ImageUpload, MockBlobStore},
        domain::{
            frames::{records::InnerDimensions, repository::MockFramesRepository},
            principals::{
                access::AccessError,
                records::{PrincipalUuid, Role},
            },
            variants::repository::MockVariantsRepository,
        },
        test::TestContext,
    };

    use super::*;

    fn new_frame(price: &str) -> NewFrame {
        NewFrame {
            uuid: FrameUuid::new(),
            name: "Classic Oak".to_string(),
            price: Decimal::from_str(price).unwrap_or_default(),
            image: ImageUpload::new("oak.png", vec![1, 2, 3]),
            dimensions: InnerDimensions {
                width: 20.0,
                height: 30.0,
            },
        }
    }

    #[tokio::test]
    async fn staff_can_create_frames() -> TestResult {
        let ctx = TestContext::new().await;
        let employee = ctx.create_principal("emma", Role::Employee).await?;

        let details = ctx
            .frames
            .create_frame(Some(employee.principal()), new_frame("10.00"))
            .await?;

        assert_eq!(details.frame.name, "Classic Oak");
        assert_eq!(details.frame.price.to_string(), "10.00");
        assert_eq!(details.frame.created_by, Some(employee.uuid));
        assert!(details.frame.image.starts_with("frames/"));
        assert!(ctx.blobs.contains(&details.frame.image));

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_create_frames() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_principal("cathy", Role::Customer).await?;

        let result = ctx
            .frames
            .create_frame(Some(customer.principal()), new_frame("10.00"))
            .await;

        assert!(
            matches!(
                result,
                Err(FramesServiceError::Access(AccessError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );
        assert!(ctx.blobs.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn negative_price_is_rejected_before_storing_the_image() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;

        let result = ctx
            .frames
            .create_frame(Some(admin.principal()), new_frame("-1.00"))
            .await;

        assert!(
            matches!(result, Err(FramesServiceError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );
        assert!(ctx.blobs.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_frames_is_open_to_anonymous_callers() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;

        ctx.frames
            .create_frame(Some(admin.principal()), new_frame("10.00"))
            .await?;

        let frames = ctx.frames.list_frames(None).await?;

        assert_eq!(frames.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_frame_requires_a_principal() {
        let ctx = TestContext::new().await;

        let result = ctx.frames.get_frame(None, FrameUuid::new()).await;

        assert!(
            matches!(
                result,
                Err(FramesServiceError::Access(AccessError::Unauthorized))
            ),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_frame_replaces_image_and_deletes_the_old_one() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;

        let created = ctx
            .frames
            .create_frame(Some(admin.principal()), new_frame("10.00"))
            .await?;

        let old_image = created.frame.image.clone();

        let updated = ctx
            .frames
            .update_frame(
                Some(admin.principal()),
                created.frame.uuid,
                FrameUpdate {
                    price: Some(Decimal::new(1250, 2)),
                    image: Some(ImageUpload::new("new.png", vec![9])),
                    ..FrameUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.frame.price.to_string(), "12.50");
        assert_eq!(updated.frame.name, "Classic Oak");
        assert_ne!(updated.frame.image, old_image);
        assert!(!ctx.blobs.contains(&old_image));
        assert!(ctx.blobs.contains(&updated.frame.image));

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_frame_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;

        let result = ctx
            .frames
            .update_frame(
                Some(admin.principal()),
                FrameUuid::new(),
                FrameUpdate::default(),
            )
            .await;

        assert!(
            matches!(result, Err(FramesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_frame_releases_every_returned_image() -> TestResult {
        let frame = FrameUuid::new();
        let mut frames = MockFramesRepository::new();

        frames
            .expect_delete_frame()
            .withf(move |uuid| *uuid == frame)
            .once()
            .returning(|_| {
                Ok(vec![
                    "frames/a.png".to_string(),
                    "frame_variants/colors/b.png".to_string(),
                ])
            });

        let mut blobs = MockBlobStore::new();

        blobs.expect_delete().times(2).returning(|_| Ok(()));

        let service = PgFramesService::with_repositories(
            Arc::new(frames),
            Arc::new(MockVariantsRepository::new()),
            Arc::new(blobs),
        );

        let admin = Principal {
            uuid: PrincipalUuid::new(),
            role: Role::Admin,
            blocked: false,
        };

        service.delete_frame(Some(admin), frame).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_insert_releases_the_stored_image() {
        let mut frames = MockFramesRepository::new();

        frames
            .expect_create_frame()
            .once()
            .returning(|_| Err(crate::database::StoreError::InvalidData));

        let mut blobs = MockBlobStore::new();

        blobs
            .expect_save()
            .once()
            .returning(|_, _, _| Ok("frames/stored.png".to_string()));

        blobs
            .expect_delete()
            .withf(|path| path == "frames/stored.png")
            .once()
            .returning(|_| Ok(()));

        let service = PgFramesService::with_repositories(
            Arc::new(frames),
            Arc::new(MockVariantsRepository::new()),
            Arc::new(blobs),
        );

        let admin = Principal {
            uuid: PrincipalUuid::new(),
            role: Role::Admin,
            blocked: false,
        };

        let result = service.create_frame(Some(admin), new_frame("5.00")).await;

        assert!(
            matches!(result, Err(FramesServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
