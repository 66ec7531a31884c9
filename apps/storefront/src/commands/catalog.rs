//! # Catalog Commands
//!
//! Read-only views of the artworks and artists.

use tracing::debug;

use artbid_client::StorefrontApi;
use artbid_core::{Artist, Product, ProductId};

use crate::error::ApiError;

/// Every product, sold or not.
pub async fn list_products(api: &StorefrontApi) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    api.list_products()
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to load products"))
}

/// Products still open for bids.
pub async fn list_available_products(api: &StorefrontApi) -> Result<Vec<Product>, ApiError> {
    debug!("list_available_products command");
    api.list_available_products()
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to load products"))
}

/// One product by id.
///
/// ## Errors
/// `NOT_FOUND` when the backend answers 404.
pub async fn get_product(api: &StorefrontApi, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    let product_id = ProductId::new(id.trim());
    if product_id.as_str().is_empty() {
        return Err(ApiError::validation("Product id is required"));
    }

    api.get_product(&product_id).await.map_err(|e| match e.status() {
        Some(404) => ApiError::not_found("Product", product_id.as_str()),
        _ => ApiError::from_client(e, "Failed to load product"),
    })
}

pub async fn list_artists(api: &StorefrontApi) -> Result<Vec<Artist>, ApiError> {
    debug!("list_artists command");
    api.list_artists()
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to load artists"))
}
