//! Storefront API Config

use std::time::Duration;

use clap::Args;

use crate::remote::HttpCartConfig;

/// Storefront API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront API base URL
    #[arg(
        long,
        env = "API_BASE_URL",
        default_value = "https://london-imports-api.onrender.com/api/v1"
    )]
    pub api_base_url: String,

    /// Bearer token of the signed-in customer; omit to shop as a guest
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub http_timeout_seconds: u64,
}

impl ApiConfig {
    /// HTTP client settings for the cart service.
    #[must_use]
    pub fn http_cart_config(&self) -> HttpCartConfig {
        HttpCartConfig {
            base_url: self.api_base_url.clone(),
            access_token: self.access_token.clone(),
            timeout: Duration::from_secs(self.http_timeout_seconds),
        }
    }
}
