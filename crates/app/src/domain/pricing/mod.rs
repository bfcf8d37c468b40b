//! Pricing & variant consistency.
//!
//! Pure functions over already-loaded catalog rows. Callers load the frame and
//! the selected variants, check ownership, then price the line.

mod money;
mod ownership;
mod total;

pub use money::{InvalidPrice, MAX_PRICE, validate_price};
pub use ownership::{VariantMismatch, VariantSelection, validate_ownership};
pub use total::{
    AmountTooLarge, InvalidQuantity, Quantity, compute_total, sum_totals, unit_price,
};
