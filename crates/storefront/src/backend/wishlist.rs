//! Wishlist methods (never cached - mutable state).

use serde::Serialize;
use tracing::instrument;

use sadok_core::{ProductId, UserId, WishlistItemId};

use super::types::WishlistItem;
use super::{ApiError, BackendClient, MessageResponse};
use crate::stores::WishlistApi;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WishlistAddRequest<'a> {
    product_id: &'a ProductId,
    user_id: &'a UserId,
}

impl BackendClient {
    /// Get the wishlist records for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn get_wishlist(&self, user: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
        self.get_json("/api/wishlist", &[("userId", user.to_string())])
            .await
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_wishlist_item(
        &self,
        product_id: &ProductId,
        user: &UserId,
    ) -> Result<WishlistItem, ApiError> {
        self.post_json(
            "/api/wishlist/add",
            &WishlistAddRequest {
                product_id,
                user_id: user,
            },
        )
        .await
    }

    /// Remove a wishlist record by its own ID (not the product ID).
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_wishlist_item(&self, item_id: &WishlistItemId) -> Result<(), ApiError> {
        let _: MessageResponse = self
            .delete_json(&format!("/api/wishlist/{item_id}"))
            .await?;
        Ok(())
    }
}

impl WishlistApi for BackendClient {
    async fn fetch(&self, user: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
        self.get_wishlist(user).await
    }

    async fn add(&self, product_id: &ProductId, user: &UserId) -> Result<WishlistItem, ApiError> {
        self.add_wishlist_item(product_id, user).await
    }

    async fn remove(&self, item_id: &WishlistItemId) -> Result<(), ApiError> {
        self.remove_wishlist_item(item_id).await
    }
}
