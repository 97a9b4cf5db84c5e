//! Display
//!
//! Console tables for carts, catalog listings and order history.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{CategorySummary, Product},
    orders::models::UserOrder,
};

/// Errors that can occur when writing a table.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Writes the cart lines followed by the item count and total.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), DisplayError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record(["Item", "Unit Price", "Qty", "Line Total"]);

    for line in cart {
        builder.push_record([
            line.name().to_string(),
            line.unit_price().to_money(currency).to_string(),
            line.quantity().to_string(),
            line.line_total().to_money(currency).to_string(),
        ]);
    }

    write_table(&mut out, builder, 1..4)?;

    writeln!(out, " Items: {}", cart.total_count())?;
    writeln!(out, " \x1b[1mTotal:\x1b[0m {}", cart.total_price())?;

    Ok(())
}

/// Writes a product listing.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_products(
    mut out: impl io::Write,
    products: &[&Product],
    currency: &'static Currency,
) -> Result<(), DisplayError> {
    if products.is_empty() {
        writeln!(out, "No products match.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Rating"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.name.clone(),
            price_label(product, currency),
            format!("{:.1}", product.rating),
        ]);
    }

    write_table(&mut out, builder, 3..5)
}

/// Writes the category list with product counts.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_categories(
    mut out: impl io::Write,
    categories: &[CategorySummary],
) -> Result<(), DisplayError> {
    if categories.is_empty() {
        writeln!(out, "No categories yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Slug", "Name", "Products", "Description"]);

    for category in categories {
        builder.push_record([
            category.slug.clone(),
            category.name.clone(),
            category.product_count.to_string(),
            category.description.clone(),
        ]);
    }

    write_table(&mut out, builder, 2..3)
}

/// Writes the signed-in shopper's order history.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_orders(
    mut out: impl io::Write,
    orders: &[UserOrder],
    currency: &'static Currency,
) -> Result<(), DisplayError> {
    if orders.is_empty() {
        writeln!(out, "You have no orders yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Items", "Amount", "Payment", "Status"]);

    for order in orders {
        let items = order
            .items
            .iter()
            .map(|item| format!("{} x{}", item.product_name, item.quantity))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            order.id.clone(),
            order
                .created_at
                .map(|created_at| created_at.strftime("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            items,
            order.amount.to_money(currency).to_string(),
            order.payment_method.clone(),
            order.status.clone(),
        ]);
    }

    write_table(&mut out, builder, 3..4)
}

fn price_label(product: &Product, currency: &'static Currency) -> String {
    let effective = product.effective_price().to_money(currency);

    match product.offer_price {
        Some(offer) if offer != product.price => {
            format!("{effective} (was {})", product.price.to_money(currency))
        }
        _ => effective.to_string(),
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: std::ops::Range<usize>,
) -> Result<(), DisplayError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}
