//! Dashboard analytics operations (read-only).

use tracing::instrument;

use sadok_core::KeyValueStore;

use crate::client::{AdminClient, AdminError};
use crate::types::{
    DashboardStats, OrderStats, OrdersByStatus, OrdersChartData, RevenueData, TopCustomer,
    TopProduct,
};

impl<S: KeyValueStore> AdminClient<S> {
    /// Headline dashboard numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, AdminError> {
        self.get_json("/api/admin/stats", &[]).await
    }

    /// Revenue per day over the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_revenue_chart(&self, days: u32) -> Result<Vec<RevenueData>, AdminError> {
        self.get_json("/api/admin/revenue-chart", &[("days", days.to_string())])
            .await
    }

    /// Best-selling products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_top_products(&self, limit: u32) -> Result<Vec<TopProduct>, AdminError> {
        self.get_json("/api/admin/top-products", &[("limit", limit.to_string())])
            .await
    }

    /// Order counts per status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders_stats(&self) -> Result<OrderStats, AdminError> {
        self.get_json("/api/admin/orders/stats", &[]).await
    }

    /// Orders and revenue per day over the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders_chart(&self, days: u32) -> Result<Vec<OrdersChartData>, AdminError> {
        self.get_json("/api/admin/orders/chart", &[("days", days.to_string())])
            .await
    }

    /// Distribution of orders across statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders_by_status(&self) -> Result<Vec<OrdersByStatus>, AdminError> {
        self.get_json("/api/admin/orders/by-status", &[]).await
    }

    /// Repeat customers ranked by total spend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_top_customers(&self, limit: u32) -> Result<Vec<TopCustomer>, AdminError> {
        self.get_json(
            "/api/admin/orders/top-customers",
            &[("limit", limit.to_string())],
        )
        .await
    }
}
