//! Variant ownership checks.

use thiserror::Error;

use crate::domain::{
    frames::records::FrameRecord,
    variants::records::{VariantKind, VariantRecord},
};

/// The variants chosen for one line, at most one per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VariantSelection<'a> {
    pub color: Option<&'a VariantRecord>,
    pub size: Option<&'a VariantRecord>,
    pub finish: Option<&'a VariantRecord>,
    pub hanging: Option<&'a VariantRecord>,
}

impl<'a> VariantSelection<'a> {
    #[must_use]
    pub const fn get(&self, kind: VariantKind) -> Option<&'a VariantRecord> {
        match kind {
            VariantKind::Color => self.color,
            VariantKind::Size => self.size,
            VariantKind::Finish => self.finish,
            VariantKind::Hanging => self.hanging,
        }
    }

    /// Present selections in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (VariantKind, &'a VariantRecord)> + '_ {
        VariantKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|variant| (kind, variant)))
    }
}

/// A selected variant belongs to a different frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} does not belong to the selected frame", dimension.field_name())]
pub struct VariantMismatch {
    pub dimension: VariantKind,
}

/// Check that every selected variant belongs to `frame`.
///
/// # Errors
///
/// Returns the first mismatching dimension, in color, size, finish, hanging order.
pub fn validate_ownership(
    frame: &FrameRecord,
    selection: &VariantSelection<'_>,
) -> Result<(), VariantMismatch> {
    for (dimension, variant) in selection.iter() {
        if variant.frame_uuid != frame.uuid {
            return Err(VariantMismatch { dimension });
        }
    }

    Ok(())
}
