//! Site settings operations.
//!
//! The admin panel edits the settings blob as free-form JSON; the storefront
//! side owns the typed view.

use tracing::instrument;

use sadok_core::KeyValueStore;

use crate::client::{AdminClient, AdminError};
use crate::types::SiteSettingsEnvelope;

impl<S: KeyValueStore> AdminClient<S> {
    /// Read the site settings blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_site_settings(&self) -> Result<SiteSettingsEnvelope, AdminError> {
        self.get_json("/api/admin/site-settings", &[]).await
    }

    /// Replace the site settings blob (whole-object semantics, no merging).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, settings))]
    pub async fn save_site_settings(
        &self,
        settings: &serde_json::Value,
    ) -> Result<SiteSettingsEnvelope, AdminError> {
        self.post_json(
            "/api/admin/site-settings",
            &SiteSettingsEnvelope {
                settings_data: settings.clone(),
            },
        )
        .await
    }
}
