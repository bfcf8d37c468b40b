//! Monetary amount validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Upper bound (exclusive) of a `NUMERIC(10, 2)` column.
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid price {price}: must be between 0 and 99999999.99 with at most 2 decimal places")]
pub struct InvalidPrice {
    pub price: Decimal,
}

/// Check that `price` fits a catalog price column, returning it with a scale of 2.
///
/// # Errors
///
/// Returns [`InvalidPrice`] for negative amounts, amounts with more than two
/// significant decimal places and amounts that overflow the column.
pub fn validate_price(price: Decimal) -> Result<Decimal, InvalidPrice> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(InvalidPrice { price });
    }

    if price.normalize().scale() > 2 || price >= MAX_PRICE {
        return Err(InvalidPrice { price });
    }

    let mut price = price;
    price.rescale(2);

    Ok(price)
}
