//! Orders service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use storefront::{cart::CartStore, orders::NewOrder};
use tracing::info;

use crate::{
    api::{PlacedOrder, StorefrontApi},
    domain::orders::errors::OrdersServiceError,
};

/// Places orders for the contents of a cart.
#[derive(Clone)]
pub struct OrdersService {
    api: Arc<dyn StorefrontApi>,
}

impl OrdersService {
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Order everything in the cart. The cart is cleared only once the API has
    /// accepted the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is invalid or the API rejects it; the cart
    /// is left as it was.
    pub async fn checkout(
        &self,
        cart: &mut CartStore,
        shipping_address_id: u64,
        payment_method: &str,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let order = NewOrder::from_cart(cart, shipping_address_id, payment_method)?;

        info!(
            lines = order.items.len(),
            units = cart.total_items(),
            payment_method,
            "placing order"
        );

        let placed = self.api.place_order(&order).await?;

        cart.clear_cart();

        info!(order_id = placed.id, status = %placed.status, "order placed");

        Ok(placed)
    }
}

impl Debug for OrdersService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OrdersService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use storefront::{
        cart::CartItem,
        orders::{OrderError, OrderItem},
        products::ProductId,
        storage::MemoryStorage,
    };
    use testresult::TestResult;

    use crate::api::{ApiError, MockStorefrontApi, models::Amount};

    use super::*;

    fn cart() -> Result<CartStore, storefront::cart::CartError> {
        let mut cart = CartStore::open(Arc::new(MemoryStorage::new()));

        cart.add_to_cart(CartItem::new(ProductId::new(1), 2).with_size("M").with_price(1_000))?;
        cart.add_to_cart(CartItem::new(ProductId::new(2), 1))?;

        Ok(cart)
    }

    #[tokio::test]
    async fn checkout_posts_cart_and_clears_it() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_place_order()
            .withf(|order| {
                order.shipping_address_id == 4
                    && order.payment_method == "cod"
                    && order.items.first()
                        == Some(&OrderItem {
                            product_id: ProductId::new(1),
                            quantity: 2,
                            size: Some("M".to_string()),
                            color: None,
                        })
                    && order.items.len() == 2
            })
            .times(1)
            .returning(|_| {
                Ok(PlacedOrder {
                    id: 31,
                    status: "pending".to_string(),
                    total_amount: Amount::Text("2000.00".to_string()),
                })
            });

        let service = OrdersService::new(Arc::new(api));
        let mut cart = cart()?;

        let placed = service.checkout(&mut cart, 4, "cod").await?;

        assert_eq!(placed.id, 31);
        assert!(cart.is_empty(), "cart should be cleared after checkout");

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_keeps_cart() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_place_order()
            .returning(|_| Err(ApiError::Unauthorized));

        let service = OrdersService::new(Arc::new(api));
        let mut cart = cart()?;

        let result = service.checkout(&mut cart, 4, "cod").await;

        assert!(
            matches!(result, Err(OrdersServiceError::Api(ApiError::Unauthorized))),
            "expected Unauthorized, got {result:?}"
        );
        assert_eq!(cart.total_items(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_never_reaches_api() {
        let mut api = MockStorefrontApi::new();
        api.expect_place_order().never();

        let service = OrdersService::new(Arc::new(api));
        let mut cart = CartStore::open(Arc::new(MemoryStorage::new()));

        let result = service.checkout(&mut cart, 4, "cod").await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidOrder(OrderError::EmptyCart))
            ),
            "expected EmptyCart, got {result:?}"
        );
    }
}
