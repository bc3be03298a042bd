//! Public site settings methods.

use tracing::instrument;

use super::types::{SettingsEnvelope, SiteSettings};
use super::{ApiError, BackendClient};
use crate::stores::SettingsApi;

impl BackendClient {
    /// Fetch the publicly-readable site settings object.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the payload does not
    /// parse. Callers that need a guaranteed object go through the settings
    /// store, which substitutes the default configuration.
    #[instrument(skip(self))]
    pub async fn get_public_settings(&self) -> Result<SiteSettings, ApiError> {
        let envelope: SettingsEnvelope = self.get_json("/api/settings", &[]).await?;
        Ok(envelope.settings_data)
    }
}

impl SettingsApi for BackendClient {
    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        self.get_public_settings().await
    }
}
