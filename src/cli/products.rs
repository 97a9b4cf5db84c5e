use std::io;

use clap::Args;
use rust_decimal::Decimal;
use storefront::{
    catalog::{CatalogApi, HttpCatalogApi, ProductQuery, SortOrder},
    display,
    prices::Price,
};

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only products whose name contains this text
    #[arg(long)]
    search: Option<String>,

    /// Only products in this category slug
    #[arg(long)]
    category: Option<String>,

    /// Lowest price, e.g. 9.99
    #[arg(long, value_parser = parse_price)]
    min_price: Option<Price>,

    /// Highest price, e.g. 49.99
    #[arg(long, value_parser = parse_price)]
    max_price: Option<Price>,

    /// Lowest rating
    #[arg(long)]
    min_rating: Option<f64>,

    /// Result order
    #[arg(long, value_enum, default_value_t)]
    sort: SortOrder,
}

impl From<ProductsArgs> for ProductQuery {
    fn from(args: ProductsArgs) -> Self {
        ProductQuery {
            search: args.search,
            category: args.category,
            min_price: args.min_price,
            max_price: args.max_price,
            min_rating: args.min_rating,
            sort: args.sort,
        }
    }
}

pub(crate) async fn run(session: &Session, args: ProductsArgs) -> Result<(), String> {
    let catalog = HttpCatalogApi::new(session.client.clone());

    let products = catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;

    let query = ProductQuery::from(args);
    let selected = query.apply(&products);

    display::write_products(io::stdout().lock(), &selected, session.currency)
        .map_err(|error| error.to_string())
}

fn parse_price(raw: &str) -> Result<Price, String> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|error| format!("invalid price {raw:?}: {error}"))?;

    Ok(Price::from_decimal(amount))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_major_units() -> TestResult {
        assert_eq!(parse_price("9.99")?, Price::from_minor(999));
        assert_eq!(parse_price(" 10 ")?, Price::from_minor(1000));
        assert!(parse_price("ten").is_err());

        Ok(())
    }
}
