//! Partial update values.

/// An update to an optional field.
///
/// Keeps "not supplied" apart from "explicitly cleared", which a plain
/// `Option` cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Leave the current value as it is.
    #[default]
    Unchanged,

    /// Replace the current value.
    Set(T),

    /// Remove the current value.
    Clear,
}

impl<T> Patch<T> {
    /// Apply the patch on top of `current`.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }
}

/// `None` means absent, `Some(None)` means cleared, `Some(Some(v))` means set.
impl<T> From<Option<Option<T>>> for Patch<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Unchanged,
            Some(None) => Self::Clear,
            Some(Some(value)) => Self::Set(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_distinguishes_unchanged_from_clear() {
        assert_eq!(Patch::Unchanged.apply(Some(1)), Some(1));
        assert_eq!(Patch::Clear.apply(Some(1)), None);
        assert_eq!(Patch::Set(2).apply(Some(1)), Some(2));
        assert_eq!(Patch::Set(2).apply(None), Some(2));
    }

    #[test]
    fn from_double_option() {
        assert_eq!(Patch::<u8>::from(None), Patch::Unchanged);
        assert_eq!(Patch::<u8>::from(Some(None)), Patch::Clear);
        assert_eq!(Patch::from(Some(Some(3_u8))), Patch::Set(3));
    }
}
