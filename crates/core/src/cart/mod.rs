//! Cart

mod errors;
mod items;
mod store;

pub use errors::CartError;
pub use items::{CartItem, VariantKey};
pub use store::{CART_STORAGE_KEY, CartStore};
