//! Variants service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    blobs::{self, BlobStore},
    database::{Db, StoreError},
    domain::{
        catalog::Catalog,
        frames::{
            records::{FrameRecord, FrameUuid, InnerDimensions},
            repository::{FramesRepository, PgFramesRepository},
        },
        pricing::validate_price,
        principals::{access::authorize, records::Principal},
        variants::{
            data::{NewVariant, VariantSubmission, VariantUpdate},
            errors::VariantsServiceError,
            records::{VariantKind, VariantRecord, VariantUuid},
            repository::{PgVariantsRepository, VariantsRepository},
        },
    },
    patch::Patch,
};

/// Outcome of a bulk variant submission.
#[derive(Debug, Default)]
pub struct VariantBatch {
    pub created: Vec<VariantRecord>,
    pub rejected: Vec<RejectedVariant>,
}

impl VariantBatch {
    /// Whether every submitted entry was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A bulk entry that could not be created, by its position in the submission.
#[derive(Debug)]
pub struct RejectedVariant {
    pub index: usize,
    pub error: VariantsServiceError,
}

#[derive(Clone)]
pub struct PgVariantsService {
    catalog: Catalog,
    variants: Arc<dyn VariantsRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl fmt::Debug for PgVariantsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgVariantsService").finish_non_exhaustive()
    }
}

impl PgVariantsService {
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
            catalog: Catalog::new(frames, Arc::clone(&variants)),
            variants,
            blobs,
        }
    }

    async fn get_frame(&self, frame: FrameUuid) -> Result<FrameRecord, VariantsServiceError> {
        self.catalog.get_frame(frame).await.map_err(|error| match error {
            StoreError::NotFound => VariantsServiceError::FrameNotFound,
            other => other.into(),
        })
    }

    async fn get_variant(
        &self,
        kind: VariantKind,
        variant: VariantUuid,
    ) -> Result<VariantRecord, VariantsServiceError> {
        Ok(self.catalog.get_variant(kind, variant).await?)
    }

    async fn ensure_name_available(
        &self,
        frame: FrameUuid,
        kind: VariantKind,
        name: &str,
        exclude: Option<VariantUuid>,
    ) -> Result<(), VariantsServiceError> {
        let taken = self
            .variants
            .variant_name_taken(frame, kind, name.to_string(), exclude)
            .await?;

        if taken {
            return Err(VariantsServiceError::DuplicateVariantName {
                kind,
                name: name.to_string(),
            });
        }

        Ok(())
    }

    async fn create_one(
        &self,
        frame: &FrameRecord,
        submission: VariantSubmission,
    ) -> Result<VariantRecord, VariantsServiceError> {
        let kind: VariantKind = submission.kind.parse()?;
        let name = normalize_name(&submission.name)?;
        let price = validate_price(submission.price)?;
        let dimensions = check_dimensions(kind, submission.dimensions)?;

        self.ensure_name_available(frame.uuid, kind, &name, None)
            .await?;

        let image = match submission.image {
            Some(upload) => {
                Some(blobs::store(self.blobs.as_ref(), kind.image_directory(), upload).await?)
            }
            None => None,
        };

        let created = self
            .variants
            .create_variant(NewVariant {
                uuid: VariantUuid::new(),
                frame_uuid: frame.uuid,
                kind,
                name: name.clone(),
                price,
                image: image.clone(),
                dimensions,
            })
            .await;

        match created {
            Ok(created) => Ok(created),
            Err(error) => {
                blobs::release(self.blobs.as_ref(), image).await;

                Err(match error {
                    StoreError::AlreadyExists => {
                        VariantsServiceError::DuplicateVariantName { kind, name }
                    }
                    other => other.into(),
                })
            }
        }
    }
}

#[async_trait]
impl VariantsService for PgVariantsService {
    async fn list_variants(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        kind: VariantKind,
    ) -> Result<Vec<VariantRecord>, VariantsServiceError> {
        authorize(principal)?;

        let frame = self.get_frame(frame).await?;

        Ok(self.catalog.list_variants(frame.uuid, kind).await?)
    }

    async fn create_variants(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        submissions: Vec<VariantSubmission>,
    ) -> Result<VariantBatch, VariantsServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let frame = self.get_frame(frame).await?;

        let mut batch = VariantBatch::default();

        for (index, submission) in submissions.into_iter().enumerate() {
            match self.create_one(&frame, submission).await {
                Ok(created) => batch.created.push(created),
                Err(error @ (VariantsServiceError::Store(_) | VariantsServiceError::Blob(_))) => {
                    return Err(error);
                }
                Err(error) => {
                    debug!(frame_uuid = %frame.uuid, index, "rejected variant: {error}");

                    batch.rejected.push(RejectedVariant { index, error });
                }
            }
        }

        info!(
            frame_uuid = %frame.uuid,
            principal_uuid = %principal.uuid,
            created = batch.created.len(),
            rejected = batch.rejected.len(),
            "created variants"
        );

        Ok(batch)
    }

    async fn update_variant(
        &self,
        principal: Option<Principal>,
        kind: VariantKind,
        variant: VariantUuid,
        update: VariantUpdate,
    ) -> Result<VariantRecord, VariantsServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        let mut record = self.get_variant(kind, variant).await?;

        if let Some(name) = update.name {
            let name = normalize_name(&name)?;

            self.ensure_name_available(record.frame_uuid, kind, &name, Some(record.uuid))
                .await?;

            record.name = name;
        }

        if let Some(price) = update.price {
            record.price = validate_price(price)?;
        }

        if update.dimensions.is_some() {
            record.dimensions = check_dimensions(kind, update.dimensions)?;
        }

        let (stored, replaced) = match update.image {
            Patch::Unchanged => (None, None),
            Patch::Clear => (None, record.image.take()),
            Patch::Set(upload) => {
                let stored =
                    blobs::store(self.blobs.as_ref(), kind.image_directory(), upload).await?;

                (Some(stored.clone()), record.image.replace(stored))
            }
        };

        let name = record.name.clone();

        let updated = match self.variants.update_variant(record).await {
            Ok(updated) => updated,
            Err(error) => {
                blobs::release(self.blobs.as_ref(), stored).await;

                return Err(match error {
                    StoreError::AlreadyExists => {
                        VariantsServiceError::DuplicateVariantName { kind, name }
                    }
                    other => other.into(),
                });
            }
        };

        blobs::release(self.blobs.as_ref(), replaced).await;

        info!(
            variant_uuid = %updated.uuid,
            frame_uuid = %updated.frame_uuid,
            kind = %kind,
            principal_uuid = %principal.uuid,
            "updated variant"
        );

        Ok(updated)
    }

    async fn delete_variant(
        &self,
        principal: Option<Principal>,
        kind: VariantKind,
        variant: VariantUuid,
    ) -> Result<(), VariantsServiceError> {
        let principal = authorize(principal)?;
        principal.ensure_staff()?;

        self.get_variant(kind, variant).await?;

        let deleted = self.variants.delete_variant(variant).await?;

        blobs::release(self.blobs.as_ref(), deleted.image).await;

        info!(
            variant_uuid = %variant,
            kind = %kind,
            principal_uuid = %principal.uuid,
            "deleted variant"
        );

        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, VariantsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(VariantsServiceError::EmptyName);
    }

    Ok(name.to_string())
}

/// Size variants need valid dimensions; other kinds must not carry any.
fn check_dimensions(
    kind: VariantKind,
    dimensions: Option<InnerDimensions>,
) -> Result<Option<InnerDimensions>, VariantsServiceError> {
    match (kind, dimensions) {
        (VariantKind::Size, Some(dimensions)) if dimensions.is_valid() => Ok(Some(dimensions)),
        (VariantKind::Size, _) | (_, Some(_)) => Err(VariantsServiceError::InvalidDimensions),
        (_, None) => Ok(None),
    }
}

#[automock]
#[async_trait]
pub trait VariantsService: Send + Sync {
    /// Variants of one kind for a frame.
    async fn list_variants(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        kind: VariantKind,
    ) -> Result<Vec<VariantRecord>, VariantsServiceError>;

    /// Create several variants at once. Staff only.
    ///
    /// Valid entries are created even when others are rejected; the batch lists both.
    async fn create_variants(
        &self,
        principal: Option<Principal>,
        frame: FrameUuid,
        submissions: Vec<VariantSubmission>,
    ) -> Result<VariantBatch, VariantsServiceError>;

    /// Apply a partial update to a variant of the given kind.
    async fn update_variant(
        &self,
        principal: Option<Principal>,
        kind: VariantKind,
        variant: VariantUuid,
        update: VariantUpdate,
    ) -> Result<VariantRecord, VariantsServiceError>;

    /// Delete a variant of the given kind and release its image.
    async fn delete_variant(
        &self,
        principal: Option<Principal>,
        kind: VariantKind,
        variant: VariantUuid,
    ) -> Result<(), VariantsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        blobs::ImageUpload,
        domain::principals::{access::AccessError, records::Role},
        test::TestContext,
    };

    use super::*;

    fn submission(kind: &str, name: &str, price: Decimal) -> VariantSubmission {
        VariantSubmission {
            kind: kind.to_string(),
            name: name.to_string(),
            price,
            image: None,
            dimensions: None,
        }
    }

    #[tokio::test]
    async fn same_name_twice_under_one_frame_is_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let first = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![submission("color", "Matte Black", Decimal::ONE)],
            )
            .await?;

        let second = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![submission("color", "Matte Black", Decimal::ONE)],
            )
            .await?;

        assert!(first.is_complete());
        assert!(second.created.is_empty());
        assert!(
            matches!(
                second.rejected.first(),
                Some(RejectedVariant {
                    index: 0,
                    error: VariantsServiceError::DuplicateVariantName { kind: VariantKind::Color, name },
                }) if name == "Matte Black"
            ),
            "expected DuplicateVariantName, got {:?}",
            second.rejected
        );

        Ok(())
    }

    #[tokio::test]
    async fn same_name_under_two_frames_succeeds_for_both() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame_a = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;
        let frame_b = ctx.create_frame(&admin, Decimal::new(2000, 2)).await?;

        for frame in [frame_a.uuid, frame_b.uuid] {
            let batch = ctx
                .variants
                .create_variants(
                    Some(admin.principal()),
                    frame,
                    vec![submission("color", "Matte Black", Decimal::ONE)],
                )
                .await?;

            assert!(batch.is_complete(), "rejected: {:?}", batch.rejected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn same_name_in_different_kinds_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let batch = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![
                    submission("color", "Natural", Decimal::ONE),
                    submission("finish", "Natural", Decimal::ONE),
                ],
            )
            .await?;

        assert_eq!(batch.created.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn bulk_create_reports_each_failed_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let batch = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![
                    submission("color", "Red", Decimal::new(250, 2)),
                    submission("texture", "Rough", Decimal::ONE),
                    submission("finish", "Gloss", Decimal::new(-1, 0)),
                    submission("size", "A4", Decimal::ONE),
                    submission("color", "Red", Decimal::ONE),
                ],
            )
            .await?;

        assert_eq!(batch.created.len(), 1);
        assert!(!batch.is_complete());

        let indexes: Vec<_> = batch.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4]);

        assert!(matches!(
            batch.rejected.iter().map(|r| &r.error).collect::<Vec<_>>().as_slice(),
            [
                VariantsServiceError::UnknownKind(_),
                VariantsServiceError::InvalidPrice(_),
                VariantsServiceError::InvalidDimensions,
                VariantsServiceError::DuplicateVariantName { .. },
            ]
        ));

        Ok(())
    }

    #[tokio::test]
    async fn size_variants_keep_their_dimensions() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let dimensions = InnerDimensions {
            width: 21.0,
            height: 29.7,
        };

        let batch = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![VariantSubmission {
                    dimensions: Some(dimensions),
                    image: Some(ImageUpload::new("a4.png", vec![4])),
                    ..submission("size", "A4", Decimal::new(300, 2))
                }],
            )
            .await?;

        let created = batch.created.first().ok_or("size variant was not created")?;

        assert_eq!(created.dimensions, Some(dimensions));
        assert!(
            created
                .image
                .as_deref()
                .is_some_and(|image| image.starts_with("frame_variants/sizes/"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_variants_for_unknown_frame_is_frame_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;

        let result = ctx
            .variants
            .create_variants(Some(admin.principal()), FrameUuid::new(), Vec::new())
            .await;

        assert!(
            matches!(result, Err(VariantsServiceError::FrameNotFound)),
            "expected FrameNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_create_variants() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let customer = ctx.create_principal("cora", Role::Customer).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let result = ctx
            .variants
            .create_variants(Some(customer.principal()), frame.uuid, Vec::new())
            .await;

        assert!(
            matches!(
                result,
                Err(VariantsServiceError::Access(AccessError::Forbidden))
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn renaming_a_variant_to_its_own_name_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;
        let variant = ctx
            .create_variant(&admin, frame.uuid, VariantKind::Color, "Red", Decimal::ONE)
            .await?;

        let updated = ctx
            .variants
            .update_variant(
                Some(admin.principal()),
                VariantKind::Color,
                variant.uuid,
                VariantUpdate {
                    name: Some("Red".to_string()),
                    price: Some(Decimal::new(175, 2)),
                    ..VariantUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Red");
        assert_eq!(updated.price.to_string(), "1.75");

        Ok(())
    }

    #[tokio::test]
    async fn renaming_onto_a_sibling_is_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        ctx.create_variant(&admin, frame.uuid, VariantKind::Color, "Red", Decimal::ONE)
            .await?;

        let blue = ctx
            .create_variant(&admin, frame.uuid, VariantKind::Color, "Blue", Decimal::ONE)
            .await?;

        let result = ctx
            .variants
            .update_variant(
                Some(admin.principal()),
                VariantKind::Color,
                blue.uuid,
                VariantUpdate {
                    name: Some("Red".to_string()),
                    ..VariantUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(VariantsServiceError::DuplicateVariantName { .. })
            ),
            "expected DuplicateVariantName, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn variant_addressed_under_the_wrong_kind_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;
        let variant = ctx
            .create_variant(&admin, frame.uuid, VariantKind::Color, "Red", Decimal::ONE)
            .await?;

        let result = ctx
            .variants
            .delete_variant(Some(admin.principal()), VariantKind::Hanging, variant.uuid)
            .await;

        assert!(
            matches!(result, Err(VariantsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clearing_a_variant_image_deletes_the_blob() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        let batch = ctx
            .variants
            .create_variants(
                Some(admin.principal()),
                frame.uuid,
                vec![VariantSubmission {
                    image: Some(ImageUpload::new("wire.png", vec![7])),
                    ..submission("hanging", "Wire", Decimal::ZERO)
                }],
            )
            .await?;

        let created = batch.created.first().ok_or("hanging variant was not created")?;
        let image = created.image.clone().ok_or("variant has no image")?;

        assert!(ctx.blobs.contains(&image));

        let updated = ctx
            .variants
            .update_variant(
                Some(admin.principal()),
                VariantKind::Hanging,
                created.uuid,
                VariantUpdate {
                    image: Patch::Clear,
                    ..VariantUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.image, None);
        assert!(!ctx.blobs.contains(&image));

        Ok(())
    }

    #[tokio::test]
    async fn list_variants_returns_only_the_requested_kind() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_principal("root", Role::Admin).await?;
        let frame = ctx.create_frame(&admin, Decimal::new(1000, 2)).await?;

        ctx.create_variant(&admin, frame.uuid, VariantKind::Color, "Red", Decimal::ONE)
            .await?;
        ctx.create_variant(&admin, frame.uuid, VariantKind::Finish, "Matte", Decimal::ONE)
            .await?;

        let colors = ctx
            .variants
            .list_variants(Some(admin.principal()), frame.uuid, VariantKind::Color)
            .await?;

        assert_eq!(colors.len(), 1);
        assert_eq!(colors.first().map(|v| v.name.as_str()), Some("Red"));

        Ok(())
    }
}
