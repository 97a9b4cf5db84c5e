//! Order Models

use clap::ValueEnum;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{cart::ProductId, prices::Price};

const DEFAULT_PAYMENT_METHOD: &str = "Card";
const DEFAULT_STATUS: &str = "pending";
const DEFAULT_PRODUCT_NAME: &str = "Product";

/// How the shopper pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    #[serde(rename = "Card")]
    Card,

    /// Cash on delivery.
    #[serde(rename = "Cash on delivery")]
    #[value(name = "cod")]
    CashOnDelivery,
}

/// One product and quantity in an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    /// Ordered product.
    pub product: ProductId,

    /// Units ordered.
    pub quantity: u32,
}

/// Shipping address of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient.
    pub full_name: String,

    /// Street address.
    pub line1: String,

    /// Second address line.
    pub line2: String,

    /// City.
    pub city: String,

    /// Country.
    pub country: String,

    /// Postal code.
    pub zip: String,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Ordered lines.
    pub items: Vec<OrderItem>,

    /// Total in major units, rounded to two decimal places.
    pub amount: f64,

    /// Payment method.
    pub payment_type: PaymentMethod,

    /// Where to ship.
    pub address: ShippingAddress,
}

/// What the backend returned for a created order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderReceipt {
    /// Order identifier, when the response carried one.
    pub id: Option<String>,
}

impl From<&Value> for OrderReceipt {
    fn from(body: &Value) -> Self {
        let id = [body, body.get("order").unwrap_or(&Value::Null)]
            .iter()
            .find_map(|value| {
                value
                    .get("id")
                    .or_else(|| value.get("_id"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string);

        OrderReceipt { id }
    }
}

/// An entry of the signed-in shopper's order history.
#[derive(Debug, Clone, PartialEq)]
pub struct UserOrder {
    /// Order identifier.
    pub id: String,

    /// Ordered lines.
    pub items: Vec<UserOrderItem>,

    /// Charged amount.
    pub amount: Price,

    /// Payment method label.
    pub payment_method: String,

    /// Fulfilment status.
    pub status: String,

    /// Creation time.
    pub created_at: Option<Timestamp>,
}

/// A line of a past order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOrderItem {
    /// Product display name.
    pub product_name: String,

    /// Units ordered.
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDocument {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    items: Vec<OrderItemDocument>,
    amount: Option<f64>,
    payment_type: Option<String>,
    status: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderItemDocument {
    product: Option<OrderProductDocument>,
    name: Option<String>,
    quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderProductDocument {
    Populated { name: Option<String> },
    Reference(String),
}

impl OrderItemDocument {
    fn product_name(self) -> String {
        match self.product {
            Some(OrderProductDocument::Populated { name: Some(name) }) => name,
            Some(OrderProductDocument::Reference(id)) => {
                let start = id
                    .char_indices()
                    .rev()
                    .nth(3)
                    .map_or(0, |(index, _)| index);

                format!("{DEFAULT_PRODUCT_NAME} {}", id.get(start..).unwrap_or_default())
            }
            _ => self
                .name
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
        }
    }
}

impl From<OrderDocument> for UserOrder {
    fn from(document: OrderDocument) -> Self {
        let items = document
            .items
            .into_iter()
            .map(|item| {
                let quantity = item.quantity.unwrap_or(1);

                UserOrderItem {
                    product_name: item.product_name(),
                    quantity,
                }
            })
            .collect();

        UserOrder {
            id: document.id,
            items,
            amount: document
                .amount
                .and_then(|amount| Price::from_major(amount).ok())
                .unwrap_or(Price::ZERO),
            payment_method: document
                .payment_type
                .filter(|method| !method.is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            status: document
                .status
                .filter(|status| !status.is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created_at: document
                .created_at
                .and_then(|created_at| created_at.parse().ok()),
        }
    }
}
