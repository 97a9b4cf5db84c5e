//! Cart Store

use std::fmt;

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    cart::{
        contents::{Adjustment, Cart},
        line::{CartLine, NewCartLine, ProductId},
        observer::{CartEvent, CartObserver, SubscriptionKey},
    },
    prices::Price,
};

/// Owns the session cart and broadcasts every change to its subscribers.
///
/// Construct one per session and hand out references to it; there is no
/// global instance. None of the operations can fail: unknown product ids are
/// ignored.
pub struct CartStore {
    cart: Cart,
    observers: SlotMap<SubscriptionKey, Box<dyn CartObserver>>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store holding an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            observers: SlotMap::with_key(),
        }
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the lines of the current cart in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Get the line for a product, if present.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.cart.get(product_id)
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.cart.total_count()
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Sum of line totals in the cart currency.
    #[must_use]
    pub fn total_price(&self) -> Money<'static, Currency> {
        self.cart.total_price()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity bumped by one and keeps
    /// the name, price and image it was first added with.
    pub fn add_item(&mut self, product: NewCartLine) {
        let product_id = product.product_id.clone();
        let quantity = self.cart.add(product);

        debug!(product = %product_id, quantity, "added item to cart");

        self.notify(&CartEvent::ItemAdded {
            product_id,
            quantity,
        });
    }

    /// Change the quantity of a line by `delta`.
    ///
    /// The line is removed when the result is zero or below. Unknown products
    /// are ignored.
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) {
        if delta == 0 {
            return;
        }

        let event = match self.cart.adjust(product_id, delta) {
            Some(Adjustment::Updated(quantity)) => CartEvent::QuantityChanged {
                product_id: product_id.clone(),
                quantity: quantity.get(),
            },
            Some(Adjustment::Removed) => CartEvent::ItemRemoved {
                product_id: product_id.clone(),
            },
            None => {
                trace!(product = %product_id, delta, "ignoring quantity change for product not in cart");

                return;
            }
        };

        debug!(product = %product_id, delta, ?event, "changed cart quantity");

        self.notify(&event);
    }

    /// Remove the line for a product. Removing a product that is not in the cart does nothing.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        if self.cart.remove(product_id).is_none() {
            trace!(product = %product_id, "ignoring removal of product not in cart");

            return;
        }

        debug!(product = %product_id, "removed item from cart");

        self.notify(&CartEvent::ItemRemoved {
            product_id: product_id.clone(),
        });
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        if self.cart.is_empty() {
            return;
        }

        self.cart.clear();

        debug!("cleared cart");

        self.notify(&CartEvent::Cleared);
    }

    /// Register an observer. It is called after every mutation that changes the cart.
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionKey
    where
        O: CartObserver + 'static,
    {
        self.observers.insert(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if the key was not subscribed.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.observers.remove(key).is_some()
    }

    fn notify(&mut self, event: &CartEvent) {
        for observer in self.observers.values_mut() {
            observer.on_cart_changed(event, &self.cart);
        }
    }
}
