//! Cart errors.

use thiserror::Error;

use crate::cart::VariantKey;

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line item cannot be added with a quantity of zero.
    #[error("cannot add {0} with a quantity of zero")]
    ZeroQuantity(VariantKey),
}
