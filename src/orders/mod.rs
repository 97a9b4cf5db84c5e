//! Orders

pub mod errors;
pub mod models;
pub mod service;

pub use errors::OrdersError;
pub use service::*;
