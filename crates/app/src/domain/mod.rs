//! Storefront domain services: flows that span local state and the remote API.

pub mod orders;
pub mod wishlist;
