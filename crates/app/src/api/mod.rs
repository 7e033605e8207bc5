//! Storefront REST API

use async_trait::async_trait;
use mockall::automock;
use storefront::{orders::NewOrder, products::ProductId};

mod client;
mod errors;
pub mod models;

pub use client::{ApiSettings, HttpStorefrontApi};
pub use errors::ApiError;
pub use models::PlacedOrder;

/// The remote endpoints the client needs.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Place an order for the given lines.
    async fn place_order(&self, order: &NewOrder) -> Result<PlacedOrder, ApiError>;

    /// Product ids in the signed-in user's server-side wishlist.
    async fn list_wishlist(&self) -> Result<Vec<ProductId>, ApiError>;

    /// Add a product to the server-side wishlist.
    async fn add_to_wishlist(&self, product_id: ProductId) -> Result<(), ApiError>;

    /// Remove a product from the server-side wishlist.
    async fn remove_from_wishlist(&self, product_id: ProductId) -> Result<(), ApiError>;
}
