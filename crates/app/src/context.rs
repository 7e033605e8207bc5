//! App Context

use std::sync::Arc;

use rusty_money::iso::{self, Currency};
use storefront::{
    cart::CartStore,
    storage::{FileStorage, Storage},
    wishlist::WishlistStore,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    api::{HttpStorefrontApi, StorefrontApi},
    config::{AppConfig, storage::StorageConfig},
    domain::{orders::OrdersService, wishlist::WishlistService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),
}

/// Everything a command needs: the local stores and the services that span
/// them and the API. Built once at startup and passed down by reference.
#[derive(Debug)]
pub struct AppContext {
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub orders: OrdersService,
    pub wishlists: WishlistService,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build the context from configuration: file-backed stores under the data
    /// directory and an HTTP client for the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured currency code is not an ISO 4217 code.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = iso::find(&config.currency)
            .ok_or_else(|| AppInitError::UnknownCurrency(config.currency.clone()))?;

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.storage.data_dir));
        let api: Arc<dyn StorefrontApi> =
            Arc::new(HttpStorefrontApi::new(config.api.clone().into()));

        debug!(
            data_dir = %config.storage.data_dir.display(),
            api_url = %config.api.api_url,
            "building app context"
        );

        Ok(Self::new(storage, api, &config.storage, currency))
    }

    /// Build the context from explicit parts.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        api: Arc<dyn StorefrontApi>,
        keys: &StorageConfig,
        currency: &'static Currency,
    ) -> Self {
        Self {
            cart: CartStore::open_with_key(storage.clone(), keys.cart_key.clone()),
            wishlist: WishlistStore::open_with_key(storage, keys.wishlist_key.clone()),
            orders: OrdersService::new(api.clone()),
            wishlists: WishlistService::new(api),
            currency,
        }
    }
}
