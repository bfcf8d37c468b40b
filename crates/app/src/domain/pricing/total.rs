//! Line totals.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    frames::records::FrameRecord,
    pricing::{money::MAX_PRICE, ownership::VariantSelection},
};

/// Largest quantity a cart line can hold (`INTEGER` column).
const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Number of units on a line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quantity must be between 1 and {MAX_QUANTITY}, got {0}")]
pub struct InvalidQuantity(pub i64);

/// A unit price or line total that does not fit a `NUMERIC(10, 2)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount exceeds 99999999.99")]
pub struct AmountTooLarge;

impl Quantity {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|quantity| *quantity <= MAX_QUANTITY)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(InvalidQuantity(value))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        i32::try_from(quantity.get()).unwrap_or(i32::MAX)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        Decimal::from(quantity.get())
    }
}

/// Frame base price plus every selected surcharge.
///
/// # Errors
///
/// Returns [`AmountTooLarge`] when the sum reaches [`MAX_PRICE`].
pub fn unit_price(
    frame: &FrameRecord,
    selection: &VariantSelection<'_>,
) -> Result<Decimal, AmountTooLarge> {
    let unit = selection
        .iter()
        .try_fold(frame.price, |sum, (_, variant)| sum.checked_add(variant.price))
        .ok_or(AmountTooLarge)?;

    bounded(unit)
}

/// Total for `quantity` units of the selected configuration.
///
/// Exact decimal arithmetic. Callers check existence and ownership first.
///
/// # Errors
///
/// Returns [`AmountTooLarge`] when the unit price or the total reaches
/// [`MAX_PRICE`].
pub fn compute_total(
    frame: &FrameRecord,
    selection: &VariantSelection<'_>,
    quantity: Quantity,
) -> Result<Decimal, AmountTooLarge> {
    let total = unit_price(frame, selection)?
        .checked_mul(Decimal::from(quantity))
        .ok_or(AmountTooLarge)?;

    bounded(total)
}

/// Sum of several line totals.
///
/// # Errors
///
/// Returns [`AmountTooLarge`] when the sum reaches [`MAX_PRICE`].
pub fn sum_totals<I>(totals: I) -> Result<Decimal, AmountTooLarge>
where
    I: IntoIterator<Item = Decimal>,
{
    let sum = totals
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or(AmountTooLarge)?;

    bounded(sum)
}

fn bounded(mut amount: Decimal) -> Result<Decimal, AmountTooLarge> {
    if amount >= MAX_PRICE {
        return Err(AmountTooLarge);
    }

    amount.rescale(2);

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;
    use proptest::prelude::*;
    use testresult::TestResult;

    use crate::domain::{
        frames::records::{FrameUuid, InnerDimensions},
        variants::records::{VariantKind, VariantRecord, VariantUuid},
    };

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap_or_default()
    }

    fn frame(price: Decimal) -> FrameRecord {
        FrameRecord {
            uuid: FrameUuid::new(),
            name: "Maple".to_string(),
            price,
            image: "frames/maple.png".to_string(),
            dimensions: InnerDimensions {
                width: 10.0,
                height: 15.0,
            },
            created_by: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn variant(frame: &FrameRecord, kind: VariantKind, price: Decimal) -> VariantRecord {
        VariantRecord {
            uuid: VariantUuid::new(),
            frame_uuid: frame.uuid,
            kind,
            name: kind.as_str().to_string(),
            price,
            image: None,
            dimensions: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn frame_only_total_is_base_price_times_quantity() -> TestResult {
        let frame = frame(dec("19.99"));

        let total = compute_total(&frame, &VariantSelection::default(), Quantity::try_from(2_u32)?)?;

        assert_eq!(total.to_string(), "39.98");

        Ok(())
    }

    #[test]
    fn color_and_size_surcharges_are_added_before_multiplying() -> TestResult {
        let frame = frame(dec("10.00"));
        let color = variant(&frame, VariantKind::Color, dec("2.50"));
        let size = variant(&frame, VariantKind::Size, dec("1.00"));

        let selection = VariantSelection {
            color: Some(&color),
            size: Some(&size),
            ..VariantSelection::default()
        };

        let total = compute_total(&frame, &selection, Quantity::try_from(3_u32)?)?;

        assert_eq!(total, dec("40.50"));
        assert_eq!(total.to_string(), "40.50");

        Ok(())
    }

    #[test]
    fn zero_priced_frame_and_variants_total_zero() {
        let frame = frame(Decimal::ZERO);
        let finish = variant(&frame, VariantKind::Finish, Decimal::ZERO);

        let selection = VariantSelection {
            finish: Some(&finish),
            ..VariantSelection::default()
        };

        assert_eq!(
            compute_total(&frame, &selection, Quantity::ONE).map(|total| total.to_string()),
            Ok("0.00".to_string())
        );
    }

    #[test]
    fn total_reaching_the_column_limit_is_rejected() -> TestResult {
        let frame = frame(dec("100.00"));

        let total = compute_total(
            &frame,
            &VariantSelection::default(),
            Quantity::try_from(2_000_000_u32)?,
        );

        assert_eq!(total, Err(AmountTooLarge));

        let largest = compute_total(
            &frame,
            &VariantSelection::default(),
            Quantity::try_from(999_999_u32)?,
        )?;

        assert_eq!(largest.to_string(), "99999900.00");

        Ok(())
    }

    #[test]
    fn surcharges_can_push_the_unit_price_over_the_limit() {
        let frame = frame(dec("99999999.00"));
        let hanging = variant(&frame, VariantKind::Hanging, dec("1.00"));

        let selection = VariantSelection {
            hanging: Some(&hanging),
            ..VariantSelection::default()
        };

        assert_eq!(unit_price(&frame, &selection), Err(AmountTooLarge));
        assert_eq!(
            compute_total(&frame, &selection, Quantity::ONE),
            Err(AmountTooLarge)
        );
    }

    #[test]
    fn summed_totals_share_the_column_limit() {
        assert_eq!(
            sum_totals([dec("0.10"), dec("0.20")]).map(|sum| sum.to_string()),
            Ok("0.30".to_string())
        );
        assert_eq!(sum_totals(Vec::new()), Ok(dec("0.00")));
        assert_eq!(
            sum_totals([dec("60000000.00"), dec("40000000.00")]),
            Err(AmountTooLarge)
        );
    }

    #[test]
    fn quantity_rejects_zero_and_negative() {
        assert_eq!(Quantity::try_from(0_i64), Err(InvalidQuantity(0)));
        assert_eq!(Quantity::try_from(-3_i64), Err(InvalidQuantity(-3)));
        assert_eq!(Quantity::default(), Quantity::ONE);
    }

    #[test]
    fn quantity_rejects_values_beyond_the_column() {
        assert!(Quantity::try_from(i64::from(i32::MAX)).is_ok());
        assert!(Quantity::try_from(i64::from(i32::MAX) + 1).is_err());
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (0_i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #[test]
        fn total_is_sum_of_components_times_quantity(
            base in cents(),
            surcharges in proptest::collection::vec(proptest::option::of(cents()), 4),
            quantity in 1_u32..1_000,
        ) {
            let frame = frame(base);
            let variants: Vec<Option<VariantRecord>> = VariantKind::ALL
                .into_iter()
                .zip(surcharges.iter())
                .map(|(kind, price)| price.map(|price| variant(&frame, kind, price)))
                .collect();

            let selection = VariantSelection {
                color: variants.first().and_then(Option::as_ref),
                size: variants.get(1).and_then(Option::as_ref),
                finish: variants.get(2).and_then(Option::as_ref),
                hanging: variants.get(3).and_then(Option::as_ref),
            };

            let quantity = Quantity::try_from(quantity)?;
            let expected = (base + surcharges.iter().flatten().sum::<Decimal>())
                * Decimal::from(quantity.get());

            let total = compute_total(&frame, &selection, quantity);

            prop_assert_eq!(total, Ok(expected));
            let total = total.unwrap_or_default();
            prop_assert_eq!(total.scale(), 2);
            prop_assert!(total >= Decimal::ZERO);
        }
    }
}
