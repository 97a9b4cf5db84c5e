//! Cart observers.

use slotmap::new_key_type;

use crate::cart::{contents::Cart, line::ProductId};

new_key_type! {
    /// Handle returned by [`CartStore::subscribe`](crate::cart::CartStore::subscribe).
    pub struct SubscriptionKey;
}

/// The mutation that produced a new cart state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added, either as a new line or by bumping an existing one.
    ItemAdded {
        /// Product added.
        product_id: ProductId,

        /// Quantity of the line after the add.
        quantity: u32,
    },

    /// The quantity of an existing line changed and stayed positive.
    QuantityChanged {
        /// Product whose line changed.
        product_id: ProductId,

        /// New quantity.
        quantity: u32,
    },

    /// A line left the cart, removed outright or decremented to zero.
    ItemRemoved {
        /// Product removed.
        product_id: ProductId,
    },

    /// Every line was removed.
    Cleared,
}

/// Receives the cart after each mutation that changed it.
///
/// Observers are called synchronously, after the mutation has been fully
/// applied, so the cart they see is always consistent with its aggregates.
pub trait CartObserver {
    /// Called once per effective mutation.
    fn on_cart_changed(&mut self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &Cart),
{
    fn on_cart_changed(&mut self, event: &CartEvent, cart: &Cart) {
        self(event, cart);
    }
}
