use std::{io, io::Write, num::NonZeroU32, str::FromStr, sync::Arc};

use clap::Args;
use storefront::{
    cart::{Cart, CartEvent, CartStore, ProductId},
    catalog::{CatalogApi, HttpCatalogApi},
    checkout::{Checkout, CheckoutForm},
    display,
    orders::{HttpOrdersApi, models::PaymentMethod},
};
use tracing::debug;

use super::Session;

/// A product id with an optional `:quantity` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    product_id: ProductId,
    quantity: NonZeroU32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match raw.split_once(':') {
            Some((id, quantity)) => (
                id,
                quantity
                    .trim()
                    .parse::<NonZeroU32>()
                    .map_err(|error| format!("invalid quantity in {raw:?}: {error}"))?,
            ),
            None => (raw, NonZeroU32::MIN),
        };

        let id = id.trim();

        if id.is_empty() {
            return Err(format!("missing product id in {raw:?}"));
        }

        Ok(ItemSpec {
            product_id: ProductId::from(id),
            quantity,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Product to order, as `<id>` or `<id>:<quantity>`; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Recipient name
    #[arg(long)]
    full_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// Country
    #[arg(long)]
    country: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t)]
    payment: PaymentMethod,
}

impl CheckoutArgs {
    fn form(&self) -> CheckoutForm {
        CheckoutForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            payment: self.payment,
        }
    }
}

pub(crate) async fn run(session: &Session, args: &CheckoutArgs) -> Result<(), String> {
    let catalog = HttpCatalogApi::new(session.client.clone());
    let mut store = CartStore::new(session.currency);

    store.subscribe(|event: &CartEvent, cart: &Cart| {
        debug!(?event, items = cart.total_count(), total = %cart.total(), "cart changed");
    });

    for item in &args.items {
        let product = catalog
            .get_product(&item.product_id)
            .await
            .map_err(|error| format!("failed to load product {}: {error}", item.product_id))?;

        store.add_item(product.to_cart_line());
        store.change_quantity(&item.product_id, i64::from(item.quantity.get()) - 1);
    }

    display::write_cart(io::stdout().lock(), store.cart()).map_err(|error| error.to_string())?;

    let checkout = Checkout::new(Arc::new(HttpOrdersApi::new(session.client.clone())));

    let receipt = checkout
        .submit(&mut store, &args.form(), session.token.as_ref())
        .await
        .map_err(|error| error.to_string())?;

    let mut out = io::stdout().lock();

    match receipt.id {
        Some(id) => writeln!(out, "Order placed: {id}"),
        None => writeln!(out, "Order placed."),
    }
    .map_err(|error| error.to_string())
}
