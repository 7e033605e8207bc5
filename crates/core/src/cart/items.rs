//! Cart Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// Identity of a purchasable configuration: product plus optional size and colour.
///
/// `None` means "no value" and is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    /// Catalog product.
    pub product_id: ProductId,

    /// Selected size, if the product has sizes.
    pub size: Option<String>,

    /// Selected colour, if the product has colours.
    pub color: Option<String>,
}

impl VariantKey {
    /// Build a key from borrowed parts.
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            product_id,
            size: size.map(str::to_string),
            color: color.map(str::to_string),
        }
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "product {}", self.product_id)?;

        if let Some(size) = &self.size {
            write!(f, " size {size:?}")?;
        }

        if let Some(color) = &self.color {
            write!(f, " color {color:?}")?;
        }

        Ok(())
    }
}

/// One cart line: a variant, its quantity and a snapshot of display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product.
    pub product_id: ProductId,

    /// Number of units. Never zero while the item is in a cart.
    pub quantity: u32,

    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Selected colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Product name at the time the item was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unit price in minor currency units at the time the item was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    /// Product image URL at the time the item was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Create a line item with no variant and no display data.
    #[must_use]
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            size: None,
            color: None,
            name: None,
            price: None,
            image: None,
        }
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the unit price in minor units.
    #[must_use]
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The variant this item represents.
    #[must_use]
    pub fn variant(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.size.as_deref(), self.color.as_deref())
    }

    /// Whether this item is the given variant.
    #[must_use]
    pub fn matches(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }
}
