//! Storefront configuration

use clap::Args;

use crate::config::{api::ApiConfig, logging::LoggingConfig};

pub mod api;
pub mod logging;

pub use api::StoreCurrency;
pub use logging::LogFormat;

/// Storefront client configuration, read from CLI arguments and the environment.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
