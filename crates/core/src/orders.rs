//! Orders
//!
//! The request body a checkout sends to the storefront API, built from the cart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{CartItem, CartStore},
    products::ProductId,
};

/// Errors raised while building an order request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The cart has no lines.
    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    /// Shipping address identifiers start at one.
    #[error("shipping address id must be positive")]
    InvalidShippingAddress,

    /// A payment method is required.
    #[error("payment method must not be blank")]
    MissingPaymentMethod,
}

/// One order line. Display fields never leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog product.
    pub product_id: ProductId,

    /// Units ordered.
    pub quantity: u32,

    /// Selected size; empty strings are sent as `null`.
    pub size: Option<String>,

    /// Selected colour; empty strings are sent as `null`.
    pub color: Option<String>,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            size: item.size.clone().filter(|size| !size.is_empty()),
            color: item.color.clone().filter(|color| !color.is_empty()),
        }
    }
}

/// Body of `POST /api/v1/orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Address the order ships to.
    pub shipping_address_id: u64,

    /// Payment method code, e.g. `cod`.
    pub payment_method: String,

    /// Lines in cart order.
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Build an order for everything in the cart.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the cart is empty, the address id is zero, or
    /// the payment method is blank.
    pub fn from_cart(
        cart: &CartStore,
        shipping_address_id: u64,
        payment_method: impl Into<String>,
    ) -> Result<Self, OrderError> {
        let payment_method = payment_method.into();

        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        if shipping_address_id == 0 {
            return Err(OrderError::InvalidShippingAddress);
        }

        if payment_method.trim().is_empty() {
            return Err(OrderError::MissingPaymentMethod);
        }

        Ok(Self {
            shipping_address_id,
            payment_method,
            items: cart.order_items(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn cart_with(
        items: impl IntoIterator<Item = CartItem>,
    ) -> Result<CartStore, crate::cart::CartError> {
        let mut cart = CartStore::open(Arc::new(MemoryStorage::new()));

        for item in items {
            cart.add_to_cart(item)?;
        }

        Ok(cart)
    }

    #[test]
    fn from_cart_strips_display_fields() -> TestResult {
        let cart = cart_with([CartItem::new(ProductId::new(4), 2)
            .with_size("M")
            .with_name("Kurta")
            .with_price(2_000)])?;

        let order = NewOrder::from_cart(&cart, 12, "cod")?;

        assert_eq!(
            serde_json::to_value(&order)?,
            serde_json::json!({
                "shipping_address_id": 12,
                "payment_method": "cod",
                "items": [{"product_id": 4, "quantity": 2, "size": "M", "color": null}],
            })
        );

        Ok(())
    }

    #[test]
    fn empty_variant_strings_are_sent_as_null() -> TestResult {
        let cart = cart_with([CartItem::new(ProductId::new(1), 1).with_size("").with_color("")])?;

        let order = NewOrder::from_cart(&cart, 1, "cod")?;

        assert_eq!(
            order.items,
            vec![OrderItem {
                product_id: ProductId::new(1),
                quantity: 1,
                size: None,
                color: None,
            }]
        );

        Ok(())
    }

    #[test]
    fn empty_cart_is_rejected() -> TestResult {
        let cart = cart_with([])?;

        assert_eq!(NewOrder::from_cart(&cart, 1, "cod"), Err(OrderError::EmptyCart));

        Ok(())
    }

    #[test]
    fn invalid_checkout_details_are_rejected() -> TestResult {
        let cart = cart_with([CartItem::new(ProductId::new(1), 1)])?;

        assert_eq!(
            NewOrder::from_cart(&cart, 0, "cod"),
            Err(OrderError::InvalidShippingAddress)
        );
        assert_eq!(
            NewOrder::from_cart(&cart, 3, "  "),
            Err(OrderError::MissingPaymentMethod)
        );

        Ok(())
    }
}
