//! Product management operations.

use tracing::instrument;

use sadok_core::{KeyValueStore, ProductId};

use crate::client::{AdminClient, AdminError};
use crate::types::{AdminProduct, ProductCreate, ProductUpdate};

#[derive(Debug, serde::Deserialize)]
struct DeleteAck {
    #[allow(dead_code)]
    message: String,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// List all products (the admin view is unpaginated apart from the
    /// backend's own limit).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> Result<Vec<AdminProduct>, AdminError> {
        self.get_json("/api/products", &[("limit", "1000".to_string())])
            .await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &ProductCreate) -> Result<AdminProduct, AdminError> {
        self.post_json("/api/products", product).await
    }

    /// Update a product; only the set fields change.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<AdminProduct, AdminError> {
        self.put_json(&format!("/api/products/{id}"), update).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminError> {
        let _: DeleteAck = self.delete_json(&format!("/api/products/{id}")).await?;
        Ok(())
    }
}
