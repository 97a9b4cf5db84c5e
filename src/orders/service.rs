//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    client::{ApiClient, Listing},
    orders::{
        errors::OrdersError,
        models::{OrderDocument, OrderPayload, OrderReceipt, UserOrder},
    },
    session::AuthToken,
};

/// Orders backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    client: ApiClient,
}

impl HttpOrdersApi {
    /// Create an orders service sending through the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn create_order(
        &self,
        order: &OrderPayload,
        token: &AuthToken,
    ) -> Result<OrderReceipt, OrdersError> {
        let body: Value = self
            .client
            .post_json("/api/orders", order, Some(token))
            .await?;

        let receipt = OrderReceipt::from(&body);

        info!(order = ?receipt.id, items = order.items.len(), "order placed");

        Ok(receipt)
    }

    async fn my_orders(&self, token: &AuthToken) -> Result<Vec<UserOrder>, OrdersError> {
        let listing: Listing<OrderDocument> =
            self.client.get_json("/api/orders/my", Some(token)).await?;

        let orders: Vec<UserOrder> = listing
            .into_items()
            .into_iter()
            .map(UserOrder::from)
            .collect();

        debug!(count = orders.len(), "loaded order history");

        Ok(orders)
    }
}

/// Places orders and reads order history for a signed-in shopper.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Submit a new order on behalf of the signed-in shopper.
    async fn create_order(
        &self,
        order: &OrderPayload,
        token: &AuthToken,
    ) -> Result<OrderReceipt, OrdersError>;

    /// List the signed-in shopper's orders.
    async fn my_orders(&self, token: &AuthToken) -> Result<Vec<UserOrder>, OrdersError>;
}
