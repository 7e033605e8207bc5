//! Client configuration

use clap::Args;

use crate::config::{api::ApiConfig, observability::LoggingConfig, storage::StorageConfig};

pub mod api;
pub mod observability;
pub mod storage;

pub use observability::LogFormat;

/// Storefront client configuration, from CLI arguments and environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Storefront API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local state settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// ISO 4217 code used to display cart subtotals
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "PKR", global = true)]
    pub currency: String,
}
