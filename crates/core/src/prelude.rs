//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartError, CartItem, CartStore, VariantKey},
    orders::{NewOrder, OrderError, OrderItem},
    pricing::{SubtotalError, subtotal},
    products::ProductId,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    wishlist::{WISHLIST_STORAGE_KEY, WishlistStore},
};
