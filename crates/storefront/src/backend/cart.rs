//! Cart methods (never cached - mutable state).

use serde::Serialize;
use tracing::instrument;

use sadok_core::{CartItemId, ProductId, UserId};

use super::types::CartItem;
use super::{ApiError, BackendClient, MessageResponse};
use crate::stores::CartApi;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartAddRequest<'a> {
    product_id: &'a ProductId,
    quantity: u32,
    user_id: &'a UserId,
}

#[derive(Debug, Serialize)]
struct CartUpdateRequest {
    quantity: u32,
}

impl BackendClient {
    /// Get the cart items for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn get_cart(&self, user: &UserId) -> Result<Vec<CartItem>, ApiError> {
        self.get_json("/api/cart", &[("userId", user.to_string())])
            .await
    }

    /// Add a product to the cart. The backend merges quantities when the
    /// product is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
        user: &UserId,
    ) -> Result<CartItem, ApiError> {
        self.post_json(
            "/api/cart/add",
            &CartAddRequest {
                product_id,
                quantity,
                user_id: user,
            },
        )
        .await
    }

    /// Set the quantity of a cart item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_item(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        self.put_json(
            &format!("/api/cart/{item_id}"),
            &CartUpdateRequest { quantity },
        )
        .await
    }

    /// Remove a cart item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: &CartItemId) -> Result<(), ApiError> {
        let _: MessageResponse = self.delete_json(&format!("/api/cart/{item_id}")).await?;
        Ok(())
    }

    /// Remove every cart item for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn clear_cart(&self, user: &UserId) -> Result<(), ApiError> {
        let _: MessageResponse = self.delete_json(&format!("/api/cart/clear/{user}")).await?;
        Ok(())
    }
}

impl CartApi for BackendClient {
    async fn fetch(&self, user: &UserId) -> Result<Vec<CartItem>, ApiError> {
        self.get_cart(user).await
    }

    async fn add(
        &self,
        product_id: &ProductId,
        quantity: u32,
        user: &UserId,
    ) -> Result<CartItem, ApiError> {
        self.add_cart_item(product_id, quantity, user).await
    }

    async fn update_quantity(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        self.update_cart_item(item_id, quantity).await
    }

    async fn remove(&self, item_id: &CartItemId) -> Result<(), ApiError> {
        self.remove_cart_item(item_id).await
    }

    async fn clear(&self, user: &UserId) -> Result<(), ApiError> {
        self.clear_cart(user).await
    }
}
