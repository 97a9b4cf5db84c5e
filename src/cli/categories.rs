use std::io;

use storefront::{
    catalog::{CatalogApi, HttpCatalogApi},
    display,
};

use super::Session;

pub(crate) async fn run(session: &Session) -> Result<(), String> {
    let categories = HttpCatalogApi::new(session.client.clone())
        .list_categories()
        .await
        .map_err(|error| format!("failed to load categories: {error}"))?;

    display::write_categories(io::stdout().lock(), &categories).map_err(|error| error.to_string())
}
