//! Cart client configuration

use clap::Args;

use crate::config::{api::ApiConfig, guest::GuestStoreConfig, observability::LoggingConfig};

pub mod api;
pub mod guest;
pub mod observability;

pub use observability::LogFormat;

/// Settings shared by every `imports-cart` command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Storefront API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Guest cart storage settings.
    #[command(flatten)]
    pub guest: GuestStoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
