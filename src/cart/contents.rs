//! Cart Contents

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::line::{CartLine, NewCartLine, ProductId},
    prices::Price,
    pricing,
};

/// Outcome of a quantity change on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Adjustment {
    /// The line now has this quantity.
    Updated(NonZeroU32),

    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

/// The ordered collection of lines for the current session.
///
/// Lines keep the order in which their product was first added.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the line for a product, if present.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    /// Check whether a product has a line in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        pricing::total_count(&self.lines)
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        pricing::total_price(&self.lines)
    }

    /// [`Cart::total`] as money in the cart currency.
    #[must_use]
    pub fn total_price(&self) -> Money<'static, Currency> {
        self.total().to_money(self.currency)
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id() == product_id)
    }

    /// Adds one unit of the product, returning its new quantity.
    pub(crate) fn add(&mut self, new_line: NewCartLine) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == &new_line.product_id)
        {
            line.increment();

            return line.quantity();
        }

        self.lines.push(CartLine::from_new(new_line));

        1
    }

    /// Applies a signed quantity change. `None` when the product is absent.
    pub(crate) fn adjust(&mut self, product_id: &ProductId, delta: i64) -> Option<Adjustment> {
        let index = self.position(product_id)?;
        let line = self.lines.get_mut(index)?;

        if let Some(quantity) = line.adjusted_quantity(delta) {
            line.set_quantity(quantity);

            return Some(Adjustment::Updated(quantity));
        }

        self.lines.remove(index);

        Some(Adjustment::Removed)
    }

    pub(crate) fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.position(product_id)?;

        Some(self.lines.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
