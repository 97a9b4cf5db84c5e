//! API Config

use std::time::Duration;

use clap::{Args, ValueEnum};
use rusty_money::iso::{self, Currency};

/// Currencies the storefront can price carts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum StoreCurrency {
    /// US dollar.
    #[default]
    Usd,

    /// Pound sterling.
    Gbp,

    /// Euro.
    Eur,
}

impl StoreCurrency {
    /// The ISO currency used for totals.
    #[must_use]
    pub fn iso(self) -> &'static Currency {
        match self {
            StoreCurrency::Usd => iso::USD,
            StoreCurrency::Gbp => iso::GBP,
            StoreCurrency::Eur => iso::EUR,
        }
    }
}

/// Backend API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront backend base URL
    #[arg(
        long,
        env = "STOREFRONT_API_BASE_URL",
        default_value = "https://ecomerce-case-backend.onrender.com"
    )]
    pub api_base_url: String,

    /// Session token (raw, `Bearer` prefixed or the stored JSON session)
    #[arg(long, env = "STOREFRONT_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Currency carts are priced in
    #[arg(
        long,
        env = "STOREFRONT_CURRENCY",
        value_enum,
        ignore_case = true,
        default_value_t = StoreCurrency::Usd
    )]
    pub currency: StoreCurrency,

    /// Request timeout in seconds
    #[arg(long, env = "STOREFRONT_TIMEOUT_SECONDS", default_value_t = 30u64)]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
