//! Checkout
//!
//! Turns the current cart into an order. The cart is cleared only once the
//! backend has accepted the order; any failure leaves it exactly as it was.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{Cart, CartStore},
    client::ApiError,
    orders::{
        OrdersApi, OrdersError,
        models::{OrderItem, OrderPayload, OrderReceipt, PaymentMethod, ShippingAddress},
    },
    session::AuthToken,
};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors raised while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// A required form field is blank.
    #[error("Please fill in all required fields ({0} is missing).")]
    MissingField(&'static str),

    /// No usable credential.
    #[error("You need to sign in to place an order.")]
    SignInRequired,

    /// The backend refused the order.
    #[error("{0}")]
    Rejected(String),

    /// The order could not be sent.
    #[error("Something went wrong. Please try again.")]
    Failed(#[source] OrdersError),
}

impl From<OrdersError> for CheckoutError {
    fn from(error: OrdersError) -> Self {
        match error {
            OrdersError::Unauthorized => CheckoutError::SignInRequired,
            OrdersError::Api(ApiError::Rejected { message, .. }) => {
                CheckoutError::Rejected(message.unwrap_or_else(|| GENERIC_FAILURE.to_string()))
            }
            error @ OrdersError::Api(ApiError::Http(_)) => CheckoutError::Failed(error),
        }
    }
}

/// Contact, shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Recipient name.
    pub full_name: String,

    /// Contact email.
    pub email: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Country.
    pub country: String,

    /// Payment method.
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CheckoutError::MissingField(*name)),
            None => Ok(()),
        }
    }

    fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            full_name: self.full_name.clone(),
            line1: self.address.clone(),
            line2: String::new(),
            city: self.city.clone(),
            country: self.country.clone(),
            zip: String::new(),
        }
    }
}

/// Build the order submission for a cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart and
/// [`CheckoutError::MissingField`] for the first blank required field.
pub fn order_payload(cart: &Cart, form: &CheckoutForm) -> Result<OrderPayload, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    form.validate()?;

    let items = cart
        .iter()
        .map(|line| OrderItem {
            product: line.product_id().clone(),
            quantity: line.quantity(),
        })
        .collect();

    Ok(OrderPayload {
        items,
        amount: cart.total().to_major(),
        payment_type: form.payment,
        address: form.shipping_address(),
    })
}

/// Places orders for the session cart.
#[derive(Clone)]
pub struct Checkout {
    orders: Arc<dyn OrdersApi>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout").finish_non_exhaustive()
    }
}

impl Checkout {
    /// Create a checkout submitting through the given orders service.
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersApi>) -> Self {
        Self { orders }
    }

    /// Submit the cart as an order and clear it on success.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the cart or form is incomplete, no
    /// credential is available, or the backend does not accept the order. The
    /// cart is untouched in every error case.
    pub async fn submit(
        &self,
        store: &mut CartStore,
        form: &CheckoutForm,
        token: Option<&AuthToken>,
    ) -> Result<OrderReceipt, CheckoutError> {
        let payload = order_payload(store.cart(), form)?;

        let token = token.ok_or(CheckoutError::SignInRequired)?;

        let receipt = match self.orders.create_order(&payload, token).await {
            Ok(receipt) => receipt,
            Err(error) => {
                warn!(%error, "order submission failed, keeping cart");

                return Err(error.into());
            }
        };

        store.clear_cart();

        info!(order = ?receipt.id, "checkout complete");

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::{NewCartLine, ProductId},
        orders::MockOrdersApi,
        prices::Price,
    };

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 St James's Square".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
            payment: PaymentMethod::Card,
        }
    }

    fn filled_store() -> CartStore {
        let mut store = CartStore::new(USD);

        store.add_item(NewCartLine::new(
            ProductId::from("p1"),
            "Beans",
            Price::from_minor(999),
        ));
        store.add_item(NewCartLine::new(
            ProductId::from("p2"),
            "Mug",
            Price::from_minor(500),
        ));
        store.add_item(NewCartLine::new(
            ProductId::from("p2"),
            "Mug",
            Price::from_minor(500),
        ));

        store
    }

    fn token() -> Option<AuthToken> {
        AuthToken::normalize("Bearer abc")
    }

    #[test]
    fn payload_mirrors_cart() -> TestResult {
        let store = filled_store();

        let payload = order_payload(store.cart(), &form())?;

        assert_eq!(
            payload.items,
            vec![
                OrderItem {
                    product: ProductId::from("p1"),
                    quantity: 1
                },
                OrderItem {
                    product: ProductId::from("p2"),
                    quantity: 2
                },
            ]
        );
        assert!((payload.amount - 19.99).abs() < 1e-9);
        assert_eq!(payload.address.line1, "12 St James's Square");
        assert_eq!(payload.address.zip, "");

        Ok(())
    }

    #[test]
    fn payload_amount_rounds_the_exact_total() -> TestResult {
        let mut store = CartStore::new(USD);
        let unit = Price::from_major(0.125)?;

        store.add_item(NewCartLine::new(ProductId::from("p1"), "Sticker", unit));
        store.add_item(NewCartLine::new(ProductId::from("p1"), "Sticker", unit));

        let payload = order_payload(store.cart(), &form())?;

        assert!((payload.amount - 0.25).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn payload_requires_items_and_fields() {
        let empty = CartStore::new(USD);
        let store = filled_store();

        let mut missing_city = form();
        missing_city.city = "  ".to_string();

        assert!(matches!(
            order_payload(empty.cart(), &form()),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(matches!(
            order_payload(store.cart(), &missing_city),
            Err(CheckoutError::MissingField("city"))
        ));
    }

    #[tokio::test]
    async fn successful_submit_clears_cart() -> TestResult {
        let mut orders = MockOrdersApi::new();

        orders
            .expect_create_order()
            .once()
            .withf(|order, token| order.items.len() == 2 && token.expose() == "abc")
            .returning(|_, _| {
                Ok(OrderReceipt {
                    id: Some("o1".to_string()),
                })
            });

        orders.expect_my_orders().never();

        let checkout = Checkout::new(Arc::new(orders));
        let mut store = filled_store();

        let receipt = checkout
            .submit(&mut store, &form(), token().as_ref())
            .await?;

        assert_eq!(receipt.id.as_deref(), Some("o1"));
        assert!(store.is_empty());
        assert_eq!(store.total_count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_submit_keeps_cart() {
        let mut orders = MockOrdersApi::new();

        orders.expect_create_order().once().returning(|_, _| {
            Err(OrdersError::Api(ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: Some("Product out of stock".to_string()),
            }))
        });

        let checkout = Checkout::new(Arc::new(orders));
        let mut store = filled_store();
        let before = store.cart().clone();

        let result = checkout.submit(&mut store, &form(), token().as_ref()).await;

        assert!(
            matches!(&result, Err(CheckoutError::Rejected(message)) if message == "Product out of stock"),
            "expected Rejected, got {result:?}"
        );
        assert_eq!(store.cart(), &before);
    }

    #[tokio::test]
    async fn rejection_without_message_uses_generic_text() {
        let mut orders = MockOrdersApi::new();

        orders.expect_create_order().once().returning(|_, _| {
            Err(OrdersError::Api(ApiError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            }))
        });

        let checkout = Checkout::new(Arc::new(orders));
        let mut store = filled_store();

        let result = checkout.submit(&mut store, &form(), token().as_ref()).await;

        assert_eq!(
            result.err().map(|error| error.to_string()).as_deref(),
            Some(GENERIC_FAILURE)
        );
        assert_eq!(store.total_count(), 3);
    }

    #[tokio::test]
    async fn unauthorized_submit_asks_to_sign_in() {
        let mut orders = MockOrdersApi::new();

        orders
            .expect_create_order()
            .once()
            .returning(|_, _| Err(OrdersError::Unauthorized));

        let checkout = Checkout::new(Arc::new(orders));
        let mut store = filled_store();

        let result = checkout.submit(&mut store, &form(), token().as_ref()).await;

        assert!(matches!(result, Err(CheckoutError::SignInRequired)));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn missing_token_never_reaches_backend() {
        let mut orders = MockOrdersApi::new();
        orders.expect_create_order().never();

        let checkout = Checkout::new(Arc::new(orders));
        let mut store = filled_store();

        let result = checkout.submit(&mut store, &form(), None).await;

        assert!(matches!(result, Err(CheckoutError::SignInRequired)));
        assert_eq!(store.len(), 2);
    }
}
