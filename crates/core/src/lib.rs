//! Storefront
//!
//! Client-side state for a storefront: a variant-aware shopping cart and a wishlist,
//! both mirrored to a pluggable key-value storage on every change.

pub mod cart;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod wishlist;
