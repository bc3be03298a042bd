//! Order methods.

use tracing::instrument;

use sadok_core::{OrderId, UserId};

use super::types::{Order, OrderCreate, QuickOrder, QuickOrderCreate};
use super::{ApiError, BackendClient};
use crate::checkout::OrdersApi;

impl BackendClient {
    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails.
    #[instrument(skip(self, order), fields(item_count = order.items.len()))]
    pub async fn create_order(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        self.post_json("/api/orders", order).await
    }

    /// Get the orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn get_orders(&self, user: &UserId) -> Result<Vec<Order>, ApiError> {
        self.get_json("/api/orders", &[("userId", user.to_string())])
            .await
    }

    /// Get a single order by ID (used by the order-tracking page).
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("/api/orders/{id}"), &[]).await
    }

    /// Place a one-click order straight from a product page.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails.
    #[instrument(skip(self, order), fields(product_id = %order.product_id))]
    pub async fn create_quick_order(
        &self,
        order: &QuickOrderCreate,
    ) -> Result<QuickOrder, ApiError> {
        self.post_json("/api/quick-order", order).await
    }
}

impl OrdersApi for BackendClient {
    async fn create_order(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        Self::create_order(self, order).await
    }
}
