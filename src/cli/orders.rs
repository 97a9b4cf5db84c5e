use std::io;

use storefront::{
    display,
    orders::{HttpOrdersApi, OrdersApi, OrdersError},
};

use super::Session;

pub(crate) async fn run(session: &Session) -> Result<(), String> {
    let token = session
        .token
        .as_ref()
        .ok_or_else(|| "You need to sign in to view your orders.".to_string())?;

    let orders = HttpOrdersApi::new(session.client.clone())
        .my_orders(token)
        .await
        .map_err(|error| match error {
            OrdersError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            error => format!("failed to load orders: {error}"),
        })?;

    display::write_orders(io::stdout().lock(), &orders, session.currency)
        .map_err(|error| error.to_string())
}
