//! Read access to frames and their variants.

use std::{fmt, sync::Arc};

use crate::{
    database::StoreError,
    domain::{
        carts::records::VariantChoices,
        frames::{
            records::{FrameRecord, FrameUuid},
            repository::FramesRepository,
        },
        pricing::VariantSelection,
        variants::{
            records::{VariantKind, VariantRecord, VariantUuid},
            repository::VariantsRepository,
        },
    },
};

/// Loaded variant rows for a line's selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SelectedVariants {
    pub(crate) color: Option<VariantRecord>,
    pub(crate) size: Option<VariantRecord>,
    pub(crate) finish: Option<VariantRecord>,
    pub(crate) hanging: Option<VariantRecord>,
}

impl SelectedVariants {
    pub(crate) fn selection(&self) -> VariantSelection<'_> {
        VariantSelection {
            color: self.color.as_ref(),
            size: self.size.as_ref(),
            finish: self.finish.as_ref(),
            hanging: self.hanging.as_ref(),
        }
    }
}

/// A selected variant could not be loaded.
#[derive(Debug)]
pub(crate) struct VariantLookupError {
    pub(crate) kind: VariantKind,
    pub(crate) source: StoreError,
}

/// Catalog lookups shared by the services that price cart lines.
#[derive(Clone)]
pub(crate) struct Catalog {
    frames: Arc<dyn FramesRepository>,
    variants: Arc<dyn VariantsRepository>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}

impl Catalog {
    pub(crate) fn new(
        frames: Arc<dyn FramesRepository>,
        variants: Arc<dyn VariantsRepository>,
    ) -> Self {
        Self { frames, variants }
    }

    pub(crate) async fn get_frame(&self, frame: FrameUuid) -> Result<FrameRecord, StoreError> {
        self.frames.get_frame(frame).await
    }

    /// Load a variant, treating a variant of another kind as missing.
    pub(crate) async fn get_variant(
        &self,
        kind: VariantKind,
        variant: VariantUuid,
    ) -> Result<VariantRecord, StoreError> {
        let record = self.variants.get_variant(variant).await?;

        if record.kind != kind {
            return Err(StoreError::NotFound);
        }

        Ok(record)
    }

    /// Load an optional selection.
    pub(crate) async fn find_variant(
        &self,
        kind: VariantKind,
        variant: Option<VariantUuid>,
    ) -> Result<Option<VariantRecord>, StoreError> {
        match variant {
            Some(variant) => self.get_variant(kind, variant).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load every selected variant, each under its own kind.
    pub(crate) async fn load_selection(
        &self,
        choices: VariantChoices,
    ) -> Result<SelectedVariants, VariantLookupError> {
        let load = |kind: VariantKind| async move {
            self.find_variant(kind, choices.get(kind))
                .await
                .map_err(|source| VariantLookupError { kind, source })
        };

        Ok(SelectedVariants {
            color: load(VariantKind::Color).await?,
            size: load(VariantKind::Size).await?,
            finish: load(VariantKind::Finish).await?,
            hanging: load(VariantKind::Hanging).await?,
        })
    }

    pub(crate) async fn list_variants(
        &self,
        frame: FrameUuid,
        kind: VariantKind,
    ) -> Result<Vec<VariantRecord>, StoreError> {
        let variants = self.variants.list_variants(vec![frame]).await?;

        Ok(variants
            .into_iter()
            .filter(|variant| variant.kind == kind)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::domain::{
        frames::repository::MockFramesRepository, variants::repository::MockVariantsRepository,
    };

    use super::*;

    fn variant(frame: FrameUuid, kind: VariantKind) -> VariantRecord {
        VariantRecord {
            uuid: VariantUuid::new(),
            frame_uuid: frame,
            kind,
            name: kind.as_str().to_string(),
            price: Decimal::ZERO,
            image: None,
            dimensions: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn variant_of_another_kind_is_not_found() {
        let stored = variant(FrameUuid::new(), VariantKind::Size);
        let uuid = stored.uuid;
        let mut variants = MockVariantsRepository::new();

        variants
            .expect_get_variant()
            .returning(move |_| Ok(stored.clone()));

        let catalog = Catalog::new(Arc::new(MockFramesRepository::new()), Arc::new(variants));

        let result = catalog.get_variant(VariantKind::Color, uuid).await;

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn load_selection_reports_the_failing_kind() {
        let finish = VariantUuid::new();
        let mut variants = MockVariantsRepository::new();

        variants
            .expect_get_variant()
            .withf(move |uuid| *uuid == finish)
            .returning(|_| Err(StoreError::NotFound));

        let catalog = Catalog::new(Arc::new(MockFramesRepository::new()), Arc::new(variants));

        let result = catalog
            .load_selection(VariantChoices {
                finish: Some(finish),
                ..VariantChoices::default()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(VariantLookupError {
                    kind: VariantKind::Finish,
                    source: StoreError::NotFound
                })
            ),
            "expected a finish lookup failure, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_variants_filters_by_kind() -> testresult::TestResult {
        let frame = FrameUuid::new();
        let listed = vec![
            variant(frame, VariantKind::Color),
            variant(frame, VariantKind::Finish),
            variant(frame, VariantKind::Color),
        ];
        let mut variants = MockVariantsRepository::new();

        variants
            .expect_list_variants()
            .withf(move |frames| frames.as_slice() == [frame])
            .returning(move |_| Ok(listed.clone()));

        let catalog = Catalog::new(Arc::new(MockFramesRepository::new()), Arc::new(variants));

        let colors = catalog.list_variants(frame, VariantKind::Color).await?;

        assert_eq!(colors.len(), 2);
        assert!(colors.iter().all(|v| v.kind == VariantKind::Color));

        Ok(())
    }
}
