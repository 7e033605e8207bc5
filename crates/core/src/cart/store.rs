//! Cart store

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    cart::{CartError, CartItem},
    orders::OrderItem,
    pricing::{SubtotalError, subtotal},
    products::ProductId,
    storage::{Storage, StorageError, snapshot},
};

/// Default storage key for the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cart";

#[derive(Debug, Serialize)]
struct CartStateRef<'a> {
    items: &'a [CartItem],
}

/// Stored lines are decoded one at a time so a single bad line cannot discard
/// the rest of the cart.
#[derive(Debug, Default, Deserialize)]
struct CartState {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Ordered collection of cart lines, unique per variant, mirrored to storage.
///
/// The store is the only writer of its storage key. It reads the key once when
/// opened and writes a full snapshot after every mutation. A failed write is
/// logged and remembered in [`CartStore::last_persist_error`] but never undoes
/// the in-memory change.
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Arc<dyn Storage>,
    key: String,
    changes: watch::Sender<Vec<CartItem>>,
    last_persist_error: Option<StorageError>,
}

impl CartStore {
    /// Open the cart stored under [`CART_STORAGE_KEY`].
    #[must_use]
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Open the cart stored under `key`, starting empty if nothing usable is stored.
    #[must_use]
    pub fn open_with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let items = snapshot::load::<CartState>(storage.as_ref(), &key)
            .map(|state| normalize(&key, state.items))
            .unwrap_or_default();

        debug!(key = %key, lines = items.len(), "opened cart");

        let (changes, _) = watch::channel(items.clone());

        Self {
            items,
            storage,
            key,
            changes,
            last_persist_error: None,
        }
    }

    /// Add a line, or grow the quantity of the line with the same variant.
    ///
    /// When merging, the existing line's display fields are kept and the incoming
    /// ones are discarded. Returns the resulting quantity of the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `item.quantity` is zero; the cart is
    /// left untouched.
    pub fn add_to_cart(&mut self, item: CartItem) -> Result<u32, CartError> {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity(item.variant()));
        }

        let existing = self.items.iter_mut().find(|line| {
            line.matches(item.product_id, item.size.as_deref(), item.color.as_deref())
        });

        let quantity = if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(item.quantity);
            line.quantity
        } else {
            let quantity = item.quantity;
            self.items.push(item);
            quantity
        };

        self.commit();

        Ok(quantity)
    }

    /// Remove the line for the given variant, returning it if it was present.
    pub fn remove_from_cart(
        &mut self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Option<CartItem> {
        let removed = self
            .position(product_id, size, color)
            .map(|index| self.items.remove(index));

        self.commit();

        removed
    }

    /// Set the quantity of the line for the given variant.
    ///
    /// A quantity of zero or less removes the line. Quantities above `u32::MAX`
    /// are clamped. Returns whether a line matched.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&str>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(product_id, size, color).is_some();
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let matched = match self
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, size, color))
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        };

        self.commit();

        matched
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines, with unpriced lines counting as zero.
    ///
    /// # Errors
    ///
    /// Returns [`SubtotalError::Overflow`] if the total does not fit in minor units.
    pub fn subtotal<'c>(
        &self,
        currency: &'c Currency,
    ) -> Result<Money<'c, Currency>, SubtotalError> {
        subtotal(&self.items, currency)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for the given variant.
    #[must_use]
    pub fn get(
        &self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|line| line.matches(product_id, size, color))
    }

    /// Order request lines for the current cart.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(OrderItem::from).collect()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Receive every committed state of the cart.
    ///
    /// The receiver starts at the current state; a mutation is published before
    /// the mutating call returns.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.changes.subscribe()
    }

    /// Storage key this cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The error from the most recent write, if it failed.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    fn position(
        &self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Option<usize> {
        self.items
            .iter()
            .position(|line| line.matches(product_id, size, color))
    }

    fn commit(&mut self) {
        let state = CartStateRef { items: &self.items };

        match snapshot::save(self.storage.as_ref(), &self.key, &state) {
            Ok(()) => self.last_persist_error = None,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to persist cart");
                self.last_persist_error = Some(error);
            }
        }

        self.changes.send_replace(self.items.clone());
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

/// Drop unreadable or empty lines and fold duplicate variants from an
/// untrusted snapshot.
fn normalize(key: &str, lines: Vec<serde_json::Value>) -> Vec<CartItem> {
    let mut normalized: Vec<CartItem> = Vec::with_capacity(lines.len());

    for (index, line) in lines.into_iter().enumerate() {
        let item = match serde_json::from_value::<CartItem>(line) {
            Ok(item) if item.quantity > 0 => item,
            Ok(item) => {
                warn!(
                    key,
                    index,
                    product_id = %item.product_id,
                    "dropping cart line with zero quantity"
                );
                continue;
            }
            Err(error) => {
                warn!(key, index, %error, "dropping unreadable cart line");
                continue;
            }
        };

        let existing = normalized.iter_mut().find(|line| {
            line.matches(item.product_id, item.size.as_deref(), item.color.as_deref())
        });

        match existing {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => normalized.push(item),
        }
    }

    normalized
}
