//! API Config

use clap::Args;

use crate::api::ApiSettings;

/// Storefront API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Storefront API origin
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_url: String,

    /// Bearer token of the signed-in user
    #[arg(long, env = "STOREFRONT_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,
}

impl From<ApiConfig> for ApiSettings {
    fn from(config: ApiConfig) -> Self {
        Self {
            base_url: config.api_url,
            token: config.api_token.filter(|token| !token.trim().is_empty()),
        }
    }
}
