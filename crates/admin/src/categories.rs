//! Category management operations.

use tracing::instrument;

use sadok_core::{CategoryId, KeyValueStore};

use crate::client::{AdminClient, AdminError};
use crate::types::{AdminCategory, CategoryCreate, CategoryUpdate};

#[derive(Debug, serde::Deserialize)]
struct DeleteAck {
    #[allow(dead_code)]
    message: String,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_all_categories(&self) -> Result<Vec<AdminCategory>, AdminError> {
        self.get_json("/api/categories", &[]).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(
        &self,
        category: &CategoryCreate,
    ) -> Result<AdminCategory, AdminError> {
        self.post_json("/api/admin/categories", category).await
    }

    /// Update a category; only the set fields change.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the request fails.
    #[instrument(skip(self, update), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        update: &CategoryUpdate,
    ) -> Result<AdminCategory, AdminError> {
        self.put_json(&format!("/api/admin/categories/{id}"), update)
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), AdminError> {
        let _: DeleteAck = self
            .delete_json(&format!("/api/admin/categories/{id}"))
            .await?;
        Ok(())
    }
}
