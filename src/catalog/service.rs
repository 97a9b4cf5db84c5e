//! Catalog service.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    cart::ProductId,
    catalog::{
        errors::CatalogError,
        models::{CategorySummary, CategorySummaryDocument, Product, ProductDocument},
    },
    client::{ApiClient, Listing},
};

/// Detail endpoint answers with the bare document or `{ "item": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductResponse {
    Wrapped { item: ProductDocument },
    Bare(ProductDocument),
}

/// Catalog backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: ApiClient,
}

impl HttpCatalogApi {
    /// Create a catalog reading through the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let listing: Listing<Value> = self.client.get_json("/api/products", None).await?;

        let products: Vec<Product> = decode_listing::<ProductDocument, _>(listing, "product");

        debug!(count = products.len(), "loaded catalog");

        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let path = format!("/api/products/{id}");

        let response: ProductResponse = self
            .client
            .get_json(&path, None)
            .await
            .map_err(|error| CatalogError::for_product(id, error))?;

        let document = match response {
            ProductResponse::Wrapped { item } | ProductResponse::Bare(item) => item,
        };

        Product::try_from(document)
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CatalogError> {
        let listing: Listing<Value> = self.client.get_json("/api/categories", None).await?;

        let categories: Vec<CategorySummary> =
            decode_listing::<CategorySummaryDocument, _>(listing, "category");

        debug!(count = categories.len(), "loaded categories");

        Ok(categories)
    }
}

/// Decode each listed document on its own, skipping the ones that cannot be used.
fn decode_listing<D, T>(listing: Listing<Value>, kind: &'static str) -> Vec<T>
where
    D: DeserializeOwned,
    T: TryFrom<D>,
    T::Error: fmt::Display,
{
    listing
        .into_items()
        .into_iter()
        .filter_map(|item| {
            let document = match serde_json::from_value::<D>(item) {
                Ok(document) => document,
                Err(error) => {
                    warn!(kind, %error, "skipping malformed document");
                    return None;
                }
            };

            match T::try_from(document) {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(kind, %error, "skipping unusable document");
                    None
                }
            }
        })
        .collect()
}

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List every product in backend order.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError>;

    /// List the categories products can be filtered by.
    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CatalogError>;
}
