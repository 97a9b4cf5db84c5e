//! Storefront
//!
//! Storefront is the session-side state of an e-commerce shop: a shopping
//! cart with change notifications, plus the catalog, checkout and order
//! history clients that feed it.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod display;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod session;
