//! Local State Config

use std::path::PathBuf;

use clap::Args;
use storefront::{cart::CART_STORAGE_KEY, wishlist::WISHLIST_STORAGE_KEY};

/// Where cart and wishlist snapshots are kept.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the snapshot files
    #[arg(
        long,
        env = "STOREFRONT_DATA_DIR",
        default_value = ".storefront",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Storage key of the cart snapshot
    #[arg(long, env = "STOREFRONT_CART_KEY", default_value = CART_STORAGE_KEY, global = true)]
    pub cart_key: String,

    /// Storage key of the wishlist snapshot
    #[arg(
        long,
        env = "STOREFRONT_WISHLIST_KEY",
        default_value = WISHLIST_STORAGE_KEY,
        global = true
    )]
    pub wishlist_key: String,
}
