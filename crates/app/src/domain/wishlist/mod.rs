//! Wishlist

pub mod errors;
pub mod service;

pub use errors::WishlistServiceError;
pub use service::*;
