//! Catalog Errors

use reqwest::StatusCode;
use thiserror::Error;

use crate::{cart::ProductId, client::ApiError, prices::PriceError};

/// Errors raised while loading products from the backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The backend sent a price that cannot be represented.
    #[error("product {product} has an invalid price")]
    InvalidPrice {
        /// Offending product.
        product: ProductId,

        /// Conversion failure.
        #[source]
        source: PriceError,
    },

    /// The request to the backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CatalogError {
    /// Classify a failed request for a single product. A `404` means the product does not exist.
    pub(crate) fn for_product(product_id: &ProductId, error: ApiError) -> Self {
        match error {
            ApiError::Rejected { status, .. } if status == StatusCode::NOT_FOUND => {
                CatalogError::NotFound(product_id.clone())
            }
            error => CatalogError::Api(error),
        }
    }
}
