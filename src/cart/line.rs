//! Cart Lines

use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Opaque identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product details captured when a product is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    /// Product being added.
    pub product_id: ProductId,

    /// Display name at add-time.
    pub name: String,

    /// Unit price at add-time.
    pub unit_price: Price,

    /// Optional display image.
    pub image: Option<String>,
}

impl NewCartLine {
    /// Creates a new line snapshot without an image.
    pub fn new(product_id: ProductId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            image: None,
        }
    }

    /// Attaches a display image to the snapshot.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One product entry in the cart.
///
/// Name, price and image are whatever they were when the product was first
/// added; later adds of the same product only touch the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    unit_price: Price,
    image: Option<String>,
    quantity: NonZeroU32,
}

impl CartLine {
    pub(crate) fn from_new(line: NewCartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            unit_price: line.unit_price,
            image: line.image,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Returns the product id of the line.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the display name snapshotted at add-time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price snapshotted at add-time.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Returns the display image, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the quantity. Always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns the unit price multiplied by the quantity.
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Quantity after applying `delta`, or `None` when the line should go.
    pub(crate) fn adjusted_quantity(&self, delta: i64) -> Option<NonZeroU32> {
        let next = i64::from(self.quantity.get()).saturating_add(delta);

        if next <= 0 {
            return None;
        }

        NonZeroU32::new(u32::try_from(next).unwrap_or(u32::MAX))
    }
}
