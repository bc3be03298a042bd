//! Order processing operations.

use serde::Serialize;
use tracing::instrument;

use sadok_core::{KeyValueStore, OrderId, OrderStatus};

use crate::client::{AdminClient, AdminError};
use crate::types::{AdminOrder, OrderFilter};

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// List orders, optionally filtered by status and paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_all_orders(&self, filter: &OrderFilter) -> Result<Vec<AdminOrder>, AdminError> {
        let mut query = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(skip) = filter.skip {
            query.push(("skip", skip.to_string()));
        }

        self.get_json("/api/admin/orders", &query).await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the request fails.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<AdminOrder, AdminError> {
        self.put_json(
            &format!("/api/admin/orders/{id}/status"),
            &StatusUpdate { status },
        )
        .await
    }
}
