//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartEvent, CartLine, CartObserver, CartStore, NewCartLine, ProductId,
        SubscriptionKey,
    },
    catalog::{
        CatalogApi, CatalogError, Category, CategorySummary, HttpCatalogApi, Product, ProductQuery,
        SortOrder,
    },
    checkout::{Checkout, CheckoutError, CheckoutForm},
    client::{ApiClient, ApiError},
    orders::{
        HttpOrdersApi, OrdersApi, OrdersError,
        models::{OrderReceipt, PaymentMethod, UserOrder},
    },
    prices::{Price, PriceError},
    session::AuthToken,
};
