//! Storefront client: configuration, API access and the flows that tie the
//! local cart and wishlist to the remote storefront.

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
