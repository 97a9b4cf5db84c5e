//! Product filtering and sorting.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::{catalog::models::Product, prices::Price};

/// Listing order for products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Backend order.
    #[default]
    Featured,

    /// Cheapest effective price first.
    PriceAsc,

    /// Most expensive effective price first.
    PriceDesc,

    /// Highest rating first.
    Rating,

    /// Most recently created first. Products without a creation time go last.
    Newest,
}

/// Filters applied to a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,

    /// Category slug.
    pub category: Option<String>,

    /// Lowest effective price, inclusive.
    pub min_price: Option<Price>,

    /// Highest effective price, inclusive.
    pub max_price: Option<Price>,

    /// Lowest rating, inclusive.
    pub min_rating: Option<f64>,

    /// Result order.
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let price = product.effective_price();

        // Blank input disables the filter; otherwise the text is matched as typed.
        let search = self
            .search
            .as_deref()
            .filter(|search| !search.trim().is_empty())
            .map(str::to_lowercase);

        self.category
            .as_deref()
            .is_none_or(|slug| product.category.slug.as_deref() == Some(slug))
            && search.is_none_or(|search| product.name.to_lowercase().contains(&search))
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
            && self.min_rating.is_none_or(|min| product.rating >= min)
    }

    /// Filter and sort a listing. Sorting is stable.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut selected: Vec<&Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .collect();

        selected.sort_by(|left, right| compare(self.sort, left, right));

        selected
    }
}

fn compare(sort: SortOrder, left: &Product, right: &Product) -> Ordering {
    match sort {
        SortOrder::Featured => Ordering::Equal,
        SortOrder::PriceAsc => left.effective_price().cmp(&right.effective_price()),
        SortOrder::PriceDesc => right.effective_price().cmp(&left.effective_price()),
        SortOrder::Rating => right.rating.total_cmp(&left.rating),
        SortOrder::Newest => match (left.created_at, right.created_at) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
