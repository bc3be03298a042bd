//! Backend REST API client.
//!
//! # Architecture
//!
//! - One [`BackendClient`] shared by every store; per-resource methods live
//!   in sibling modules (`products`, `cart`, `orders`, ...)
//! - The backend is the source of truth - mutations are followed by an
//!   authoritative re-fetch in the stores, never patched locally
//! - In-memory caching via `moka` for catalog reads (5 minute TTL); mutable
//!   cart/wishlist state is never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use sadok_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config)?;
//!
//! // Get a product
//! let product = client.get_product(&product_id).await?;
//!
//! // Add it to the guest cart
//! client.add_cart_item(&product.id, 1, &UserId::guest()).await?;
//! ```

mod cache;
mod cart;
mod categories;
mod orders;
mod payment;
mod products;
mod settings;
pub mod types;
mod wishlist;

pub use products::{ProductQuery, ProductSort};
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::StorefrontConfig;
use cache::CacheValue;

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (transport level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail reported by the backend.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the response body.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Acknowledgement body returned by delete/clear endpoints:
/// `{"message": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct MessageResponse {
    #[allow(dead_code)]
    pub message: String,
}

/// Client for the nursery backend REST API.
///
/// Cheap to clone; all clones share the HTTP connection pool and the catalog
/// cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl BackendClient {
    /// Create a new backend API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::from_parts(config.api_base_url.clone(), config.http_timeout)
    }

    /// Create a client directly from a base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_parts(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                http,
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Build a full URL for an API path (`/api/...`).
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Send a request and parse the JSON response.
    ///
    /// Reads the body as text first for better error diagnostics, maps 404 to
    /// [`ApiError::NotFound`] and other non-success statuses to
    /// [`ApiError::Api`] with the backend's `detail` message when present.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorDetail>(&body)
                .map_or_else(|_| body.chars().take(200).collect::<String>(), |e| e.detail);

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound(message));
            }

            tracing::error!(
                status = %status,
                message = %message,
                "Backend API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse backend response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(self.inner.http.get(self.url(path)).query(query))
            .await
    }

    /// POST a JSON body and parse the JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.inner.http.post(self.url(path)).json(body))
            .await
    }

    /// POST with query parameters only (no body).
    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(self.inner.http.post(self.url(path)).query(query))
            .await
    }

    /// PUT a JSON body and parse the JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.inner.http.put(self.url(path)).json(body))
            .await
    }

    /// DELETE a resource and parse the JSON response.
    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.inner.http.delete(self.url(path))).await
    }

    /// Shared catalog cache handle.
    pub(crate) fn cache(&self) -> &Cache<String, CacheValue> {
        &self.inner.cache
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: &sadok_core::ProductId) {
        self.inner.cache.invalidate(&format!("product:{id}")).await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");

        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[tokio::test]
    async fn test_url_join_strips_trailing_slash() {
        let client = BackendClient::from_parts(
            "http://localhost:8000/".parse().unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.url("/api/cart"), "http://localhost:8000/api/cart");
    }
}
