//! Wishlist service.
//!
//! The server is the source of truth once a user is signed in; the local store
//! is a cache that is reconciled on sign-in and mirrored after each remote change.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use storefront::{products::ProductId, wishlist::WishlistStore};
use tracing::{debug, info};

use crate::{
    api::{ApiError, StorefrontApi},
    domain::wishlist::errors::WishlistServiceError,
};

/// Keeps the local wishlist in step with the signed-in user's server copy.
#[derive(Clone)]
pub struct WishlistService {
    api: Arc<dyn StorefrontApi>,
}

impl WishlistService {
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Replace the local wishlist with the server's. Returns the number of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the server wishlist cannot be fetched; the local copy
    /// is left as it was.
    pub async fn sync(&self, wishlist: &mut WishlistStore) -> Result<usize, WishlistServiceError> {
        let product_ids = self.api.list_wishlist().await?;

        wishlist.set_wishlist(product_ids);

        info!(products = wishlist.len(), "wishlist synced");

        Ok(wishlist.len())
    }

    /// Add a product remotely, then locally. A product the server already has is
    /// still added locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request for any other reason.
    pub async fn add(
        &self,
        wishlist: &mut WishlistStore,
        product_id: ProductId,
    ) -> Result<(), WishlistServiceError> {
        match self.api.add_to_wishlist(product_id).await {
            Ok(()) => {}
            Err(ApiError::Conflict(_)) => {
                debug!(%product_id, "product already in server wishlist");
            }
            Err(error) => return Err(error.into()),
        }

        wishlist.add_to_wishlist(product_id);

        Ok(())
    }

    /// Remove a product remotely, then locally. A product the server does not
    /// have is still removed locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request for any other reason.
    pub async fn remove(
        &self,
        wishlist: &mut WishlistStore,
        product_id: ProductId,
    ) -> Result<(), WishlistServiceError> {
        match self.api.remove_from_wishlist(product_id).await {
            Ok(()) => {}
            Err(ApiError::NotFound(_)) => {
                debug!(%product_id, "product not in server wishlist");
            }
            Err(error) => return Err(error.into()),
        }

        wishlist.remove_from_wishlist(product_id);

        Ok(())
    }

    /// Flip membership of a product. Returns whether it is now wishlisted.
    ///
    /// # Errors
    ///
    /// See [`WishlistService::add`] and [`WishlistService::remove`].
    pub async fn toggle(
        &self,
        wishlist: &mut WishlistStore,
        product_id: ProductId,
    ) -> Result<bool, WishlistServiceError> {
        if wishlist.is_wishlisted(product_id) {
            self.remove(wishlist, product_id).await?;
        } else {
            self.add(wishlist, product_id).await?;
        }

        Ok(wishlist.is_wishlisted(product_id))
    }

    /// Forget the local wishlist, e.g. on sign-out. The server copy is untouched.
    pub fn logout(&self, wishlist: &mut WishlistStore) {
        wishlist.clear_wishlist();

        info!("local wishlist cleared");
    }
}

impl Debug for WishlistService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("WishlistService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use storefront::storage::MemoryStorage;
    use testresult::TestResult;

    use crate::api::MockStorefrontApi;

    use super::*;

    fn pid(id: u64) -> ProductId {
        ProductId::new(id)
    }

    fn local() -> WishlistStore {
        WishlistStore::open(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn sync_replaces_local_copy() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_list_wishlist()
            .times(1)
            .returning(|| Ok(vec![ProductId::new(4), ProductId::new(9)]));

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();
        wishlist.add_to_wishlist(pid(1));

        let count = service.sync(&mut wishlist).await?;

        assert_eq!(count, 2);
        assert_eq!(wishlist.product_ids(), &[pid(4), pid(9)]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_sync_keeps_local_copy() {
        let mut api = MockStorefrontApi::new();
        api.expect_list_wishlist()
            .returning(|| Err(ApiError::Unauthorized));

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();
        wishlist.add_to_wishlist(pid(1));

        let result = service.sync(&mut wishlist).await;

        assert!(
            matches!(result, Err(WishlistServiceError::Api(ApiError::Unauthorized))),
            "expected Unauthorized, got {result:?}"
        );
        assert!(wishlist.is_wishlisted(pid(1)));
    }

    #[tokio::test]
    async fn add_converges_on_conflict() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_add_to_wishlist()
            .returning(|_| Err(ApiError::Conflict("Product already in wishlist".to_string())));

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();

        service.add(&mut wishlist, pid(5)).await?;

        assert!(wishlist.is_wishlisted(pid(5)));

        Ok(())
    }

    #[tokio::test]
    async fn add_of_unknown_product_fails_locally_too() {
        let mut api = MockStorefrontApi::new();
        api.expect_add_to_wishlist()
            .returning(|_| Err(ApiError::NotFound("Product not found".to_string())));

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();

        let result = service.add(&mut wishlist, pid(404)).await;

        assert!(result.is_err(), "expected NotFound to propagate");
        assert!(!wishlist.is_wishlisted(pid(404)));
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_add_to_wishlist()
            .withf(|id| *id == ProductId::new(7))
            .times(1)
            .returning(|_| Ok(()));
        api.expect_remove_from_wishlist()
            .withf(|id| *id == ProductId::new(7))
            .times(1)
            .returning(|_| Err(ApiError::NotFound(String::new())));

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();

        assert!(service.toggle(&mut wishlist, pid(7)).await?);
        assert!(!service.toggle(&mut wishlist, pid(7)).await?);

        Ok(())
    }

    #[test]
    fn logout_clears_local_only() {
        let mut api = MockStorefrontApi::new();
        api.expect_remove_from_wishlist().never();

        let service = WishlistService::new(Arc::new(api));
        let mut wishlist = local();
        wishlist.set_wishlist([pid(1), pid(2)]);

        service.logout(&mut wishlist);

        assert!(wishlist.is_empty());
    }
}
