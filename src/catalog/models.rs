//! Catalog Models

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    cart::{NewCartLine, ProductId},
    catalog::errors::CatalogError,
    prices::Price,
};

const DEFAULT_RATING: f64 = 4.3;
const DEFAULT_CATEGORY_NAME: &str = "Other";
const DEFAULT_CATEGORY_DESCRIPTION: &str = "Category description";

/// Category a product is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display name.
    pub name: String,

    /// URL slug, when the backend populated the category.
    pub slug: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Backend identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// List price.
    pub price: Price,

    /// Discounted price, when on offer.
    pub offer_price: Option<Price>,

    /// Average rating.
    pub rating: f64,

    /// Primary image.
    pub image: Option<String>,

    /// Category.
    pub category: Category,

    /// Creation time, when the backend sent a parseable one.
    pub created_at: Option<Timestamp>,
}

impl Product {
    /// The price a shopper pays: the offer price when present, else the list price.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.offer_price.unwrap_or(self.price)
    }

    /// Snapshot of this product for the cart.
    #[must_use]
    pub fn to_cart_line(&self) -> NewCartLine {
        NewCartLine {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.effective_price(),
            image: self.image.clone(),
        }
    }
}

/// Product document as served by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDocument {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    price: f64,
    offer_price: Option<f64>,
    rating: Option<f64>,
    image: Option<String>,
    main_image: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    category: Option<CategoryDocument>,
    created_at: Option<String>,
}

/// Categories arrive populated on listings and as a bare id or slug on some detail responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryDocument {
    Populated {
        name: Option<String>,
        slug: Option<String>,
    },
    Reference(String),
}

impl From<Option<CategoryDocument>> for Category {
    fn from(document: Option<CategoryDocument>) -> Self {
        match document {
            Some(CategoryDocument::Populated { name, slug }) => Category {
                name: name
                    .or_else(|| slug.clone())
                    .unwrap_or_else(|| DEFAULT_CATEGORY_NAME.to_string()),
                slug,
            },
            Some(CategoryDocument::Reference(name)) => Category { name, slug: None },
            None => Category {
                name: DEFAULT_CATEGORY_NAME.to_string(),
                slug: None,
            },
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = CatalogError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        let id = ProductId::from(document.id);

        let invalid_price = |source| CatalogError::InvalidPrice {
            product: id.clone(),
            source,
        };

        let price = Price::from_major(document.price).map_err(invalid_price)?;

        let offer_price = document
            .offer_price
            .map(Price::from_major)
            .transpose()
            .map_err(invalid_price)?;

        let image = document
            .image
            .filter(|image| !image.is_empty())
            .or(document.main_image)
            .or_else(|| document.images.into_iter().next());

        let created_at = document
            .created_at
            .and_then(|created_at| created_at.parse::<Timestamp>().ok());

        Ok(Product {
            id,
            name: document.name,
            price,
            offer_price,
            rating: document.rating.unwrap_or(DEFAULT_RATING),
            image,
            category: Category::from(document.category),
            created_at,
        })
    }
}

/// A category as listed by `GET /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// URL slug, the value `ProductQuery::category` filters on.
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Short description.
    pub description: String,

    /// Number of products listed under the category.
    pub product_count: u64,

    /// Cover image.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategorySummaryDocument {
    slug: String,
    name: String,
    description: Option<String>,
    product_count: Option<u64>,
    image: Option<String>,
}

impl From<CategorySummaryDocument> for CategorySummary {
    fn from(document: CategorySummaryDocument) -> Self {
        CategorySummary {
            slug: document.slug,
            name: document.name,
            description: document
                .description
                .unwrap_or_else(|| DEFAULT_CATEGORY_DESCRIPTION.to_string()),
            product_count: document.product_count.unwrap_or_default(),
            image: document.image.filter(|image| !image.is_empty()),
        }
    }
}
