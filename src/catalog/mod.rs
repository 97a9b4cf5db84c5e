//! Catalog
//!
//! Read-only view of the backend product catalog, and the snapshot a product
//! hands to the cart when it is added.

pub mod errors;
pub mod models;
pub mod query;
pub mod service;

pub use errors::CatalogError;
pub use models::{Category, CategorySummary, Product};
pub use query::{ProductQuery, SortOrder};
pub use service::*;
