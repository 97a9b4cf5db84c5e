//! Cart
//!
//! The shopping cart for the current session. A [`CartStore`] owns the single
//! authoritative [`Cart`]; everything else reads it through the store or
//! mutates it through the store's operations.
//!
//! Lines are keyed by [`ProductId`]: adding a product that is already in the
//! cart bumps its quantity instead of adding a second line, and a line whose
//! quantity would drop to zero is removed.

mod contents;
mod line;
mod observer;
mod store;

pub use contents::Cart;
pub use line::{CartLine, NewCartLine, ProductId};
pub use observer::{CartEvent, CartObserver, SubscriptionKey};
pub use store::CartStore;
