//! API response models.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Deserialize;
use storefront::products::ProductId;

/// Order summary returned after placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedOrder {
    /// Server-assigned order id.
    pub id: u64,

    /// Order status, e.g. `pending`.
    pub status: String,

    /// Amount charged, as computed by the server.
    pub total_amount: Amount,
}

/// A decimal amount; the API sends decimals as strings but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Decimal string, e.g. `"8498.00"`.
    Text(String),

    /// Plain JSON number.
    Number(serde_json::Number),
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => Display::fmt(number, f),
        }
    }
}

/// One entry of `GET /api/v1/wishlist/`. Embedded product details are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WishlistEntry {
    pub(crate) product_id: ProductId,
}
