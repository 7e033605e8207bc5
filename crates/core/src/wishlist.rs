//! Wishlist

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    products::ProductId,
    storage::{Storage, StorageError, snapshot},
};

/// Default storage key for the wishlist snapshot.
pub const WISHLIST_STORAGE_KEY: &str = "wishlist";

#[derive(Debug, Serialize)]
struct WishlistStateRef<'a> {
    product_ids: &'a [ProductId],
}

#[derive(Debug, Default, Deserialize)]
struct WishlistState {
    #[serde(default)]
    product_ids: Vec<ProductId>,
}

/// Set of wishlisted products, mirrored to storage after every change.
///
/// Every operation is idempotent. Insertion order is kept for display only.
pub struct WishlistStore {
    product_ids: Vec<ProductId>,
    storage: Arc<dyn Storage>,
    key: String,
    changes: watch::Sender<Vec<ProductId>>,
    last_persist_error: Option<StorageError>,
}

impl WishlistStore {
    /// Open the wishlist stored under [`WISHLIST_STORAGE_KEY`].
    #[must_use]
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        Self::open_with_key(storage, WISHLIST_STORAGE_KEY)
    }

    /// Open the wishlist stored under `key`, starting empty if nothing usable is stored.
    #[must_use]
    pub fn open_with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let product_ids = snapshot::load::<WishlistState>(storage.as_ref(), &key)
            .map(|state| dedup(state.product_ids))
            .unwrap_or_default();

        debug!(key = %key, products = product_ids.len(), "opened wishlist");

        let (changes, _) = watch::channel(product_ids.clone());

        Self {
            product_ids,
            storage,
            key,
            changes,
            last_persist_error: None,
        }
    }

    /// Add a product. Adding a product twice keeps a single entry.
    pub fn add_to_wishlist(&mut self, product_id: ProductId) {
        if !self.product_ids.contains(&product_id) {
            self.product_ids.push(product_id);
        }

        self.commit();
    }

    /// Remove a product if present.
    pub fn remove_from_wishlist(&mut self, product_id: ProductId) {
        self.product_ids.retain(|id| *id != product_id);
        self.commit();
    }

    /// Whether the product is wishlisted.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        self.product_ids.contains(&product_id)
    }

    /// Replace the whole wishlist, e.g. with the server's copy after signing in.
    ///
    /// Duplicates in `product_ids` are collapsed, keeping the first occurrence.
    pub fn set_wishlist(&mut self, product_ids: impl IntoIterator<Item = ProductId>) {
        self.product_ids = dedup(product_ids);
        self.commit();
    }

    /// Remove every product, e.g. on sign-out.
    pub fn clear_wishlist(&mut self) {
        self.product_ids.clear();
        self.commit();
    }

    /// Wishlisted products in insertion order.
    #[must_use]
    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    /// Whether nothing is wishlisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    /// Receive every committed state of the wishlist.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ProductId>> {
        self.changes.subscribe()
    }

    /// The error from the most recent write, if it failed.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    fn commit(&mut self) {
        let state = WishlistStateRef {
            product_ids: &self.product_ids,
        };

        match snapshot::save(self.storage.as_ref(), &self.key, &state) {
            Ok(()) => self.last_persist_error = None,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to persist wishlist");
                self.last_persist_error = Some(error);
            }
        }

        self.changes.send_replace(self.product_ids.clone());
    }
}

impl Debug for WishlistStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("WishlistStore")
            .field("key", &self.key)
            .field("product_ids", &self.product_ids)
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

fn dedup(product_ids: impl IntoIterator<Item = ProductId>) -> Vec<ProductId> {
    let mut seen = FxHashSet::default();

    product_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::{MemoryStorage, MockStorage};

    use super::*;

    fn pid(id: u64) -> ProductId {
        ProductId::new(id)
    }

    fn empty_wishlist() -> (Arc<MemoryStorage>, WishlistStore) {
        let storage = Arc::new(MemoryStorage::new());
        let wishlist = WishlistStore::open(storage.clone());

        (storage, wishlist)
    }

    #[test]
    fn add_twice_keeps_one_entry() {
        let (_, mut wishlist) = empty_wishlist();

        wishlist.add_to_wishlist(pid(5));
        wishlist.add_to_wishlist(pid(5));

        assert_eq!(wishlist.product_ids(), &[pid(5)]);
    }

    #[test]
    fn add_add_remove_leaves_nothing() {
        let (_, mut wishlist) = empty_wishlist();

        wishlist.add_to_wishlist(pid(5));
        wishlist.add_to_wishlist(pid(5));
        wishlist.remove_from_wishlist(pid(5));

        assert!(!wishlist.is_wishlisted(pid(5)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn remove_missing_is_noop() {
        let (_, mut wishlist) = empty_wishlist();

        wishlist.add_to_wishlist(pid(1));
        wishlist.remove_from_wishlist(pid(2));

        assert_eq!(wishlist.product_ids(), &[pid(1)]);
    }

    #[test]
    fn set_wishlist_replaces_and_dedups() {
        let (_, mut wishlist) = empty_wishlist();

        wishlist.add_to_wishlist(pid(1));
        wishlist.set_wishlist([pid(3), pid(2), pid(3)]);

        assert_eq!(wishlist.product_ids(), &[pid(3), pid(2)]);
        assert!(!wishlist.is_wishlisted(pid(1)));
    }

    #[test]
    fn clear_wishlist_empties_set() {
        let (_, mut wishlist) = empty_wishlist();

        wishlist.set_wishlist([pid(1), pid(2)]);
        wishlist.clear_wishlist();

        assert_eq!(wishlist.len(), 0);
    }

    #[test]
    fn reopening_rehydrates_ids() -> TestResult {
        let (storage, mut wishlist) = empty_wishlist();

        wishlist.add_to_wishlist(pid(8));
        wishlist.add_to_wishlist(pid(2));

        assert_eq!(
            storage.load(WISHLIST_STORAGE_KEY)?.as_deref(),
            Some(r#"{"state":{"product_ids":[8,2]},"version":0}"#)
        );

        let reopened = WishlistStore::open(storage);

        assert_eq!(reopened.product_ids(), &[pid(8), pid(2)]);

        Ok(())
    }

    #[test]
    fn rehydration_drops_duplicate_ids() {
        let storage = Arc::new(MemoryStorage::with_entry(
            WISHLIST_STORAGE_KEY,
            r#"{"state":{"product_ids":[4,4,6]},"version":0}"#,
        ));

        let wishlist = WishlistStore::open(storage);

        assert_eq!(wishlist.product_ids(), &[pid(4), pid(6)]);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let mut storage = MockStorage::new();
        storage.expect_load().returning(|_| Ok(None));
        storage
            .expect_save()
            .returning(|_, _| Err(StorageError::Unavailable("read-only".to_string())));

        let mut wishlist = WishlistStore::open(Arc::new(storage));

        wishlist.add_to_wishlist(pid(1));

        assert!(wishlist.is_wishlisted(pid(1)));
        assert!(wishlist.last_persist_error().is_some());
    }

    #[test]
    fn subscribers_observe_membership_changes() {
        let (_, mut wishlist) = empty_wishlist();
        let receiver = wishlist.subscribe();

        wishlist.add_to_wishlist(pid(11));

        assert_eq!(*receiver.borrow(), vec![pid(11)]);
    }
}
