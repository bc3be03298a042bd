//! LiqPay payment session methods.
//!
//! The backend signs the payment payload; this client only creates the
//! session and polls its status. Parameters travel as query parameters, the
//! way the checkout endpoint expects them.

use tracing::instrument;

use rust_decimal::Decimal;
use sadok_core::OrderId;

use super::types::{LiqpayCheckout, PaymentStatusResponse};
use super::{ApiError, BackendClient};

impl BackendClient {
    /// Create a LiqPay checkout session for an order.
    ///
    /// `result_url` is where the gateway redirects the customer afterwards;
    /// `server_url` receives the signed callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to create the session.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn create_liqpay_checkout(
        &self,
        order_id: &OrderId,
        amount: Decimal,
        description: Option<&str>,
        result_url: Option<&str>,
        server_url: Option<&str>,
    ) -> Result<LiqpayCheckout, ApiError> {
        let mut query = vec![
            ("order_id", order_id.to_string()),
            ("amount", amount.to_string()),
            (
                "description",
                description
                    .unwrap_or("Оплата замовлення Sadok")
                    .to_string(),
            ),
        ];
        if let Some(result_url) = result_url {
            query.push(("result_url", result_url.to_string()));
        }
        if let Some(server_url) = server_url {
            query.push(("server_url", server_url.to_string()));
        }

        self.post_query("/api/liqpay/create-checkout", &query).await
    }

    /// Poll the payment status of an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ApiError> {
        self.get_json(&format!("/api/liqpay/status/{order_id}"), &[])
            .await
    }
}
