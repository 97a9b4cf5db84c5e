use clap::{Parser, Subcommand};
use rusty_money::iso::Currency;
use storefront::{
    client::ApiClient,
    config::{StorefrontConfig, logging::LoggingConfig},
    session::AuthToken,
};

mod categories;
mod checkout;
mod orders;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and checkout client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(products::ProductsArgs),

    /// List product categories and their slugs
    Categories,

    /// List your orders
    Orders,

    /// Build a cart and place an order
    Checkout(checkout::CheckoutArgs),
}

/// Backend access shared by every subcommand.
#[derive(Debug)]
pub(crate) struct Session {
    client: ApiClient,
    currency: &'static Currency,
    token: Option<AuthToken>,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let api = &self.config.api;

        let client = ApiClient::new(api.api_base_url.as_str(), api.timeout())
            .map_err(|error| format!("failed to create HTTP client: {error}"))?;

        let session = Session {
            client,
            currency: api.currency.iso(),
            token: api.auth_token.as_deref().and_then(AuthToken::normalize),
        };

        match self.command {
            Commands::Products(args) => products::run(&session, args).await,
            Commands::Categories => categories::run(&session).await,
            Commands::Orders => orders::run(&session).await,
            Commands::Checkout(args) => checkout::run(&session, &args).await,
        }
    }
}
