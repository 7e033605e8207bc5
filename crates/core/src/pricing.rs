//! Prices

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::CartItem;

/// Errors that can occur while calculating a cart subtotal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubtotalError {
    /// The subtotal does not fit in signed minor units.
    #[error("cart subtotal overflows minor units")]
    Overflow,
}

/// Calculates the display subtotal of a list of cart lines.
///
/// Lines without a price snapshot count as zero, matching how the storefront
/// renders them.
///
/// # Errors
///
/// - [`SubtotalError::Overflow`]: the total does not fit in minor units.
pub fn subtotal<'c>(
    items: &[CartItem],
    currency: &'c Currency,
) -> Result<Money<'c, Currency>, SubtotalError> {
    let minor = items.iter().try_fold(0_u64, |acc, item| {
        item.price
            .unwrap_or_default()
            .checked_mul(u64::from(item.quantity))
            .and_then(|line| acc.checked_add(line))
    });

    let minor = minor
        .and_then(|minor| i64::try_from(minor).ok())
        .ok_or(SubtotalError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}
