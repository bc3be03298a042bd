//! Site settings store.

use std::future::Future;
use std::sync::RwLock;

use tracing::warn;

use crate::backend::ApiError;
use crate::backend::types::SiteSettings;

/// Backend operation the settings store depends on.
pub trait SettingsApi: Send + Sync {
    /// Fetch the publicly-readable settings object.
    fn fetch_settings(&self) -> impl Future<Output = Result<SiteSettings, ApiError>> + Send;
}

/// Session-cached site configuration.
///
/// Loaded once on application start and replaced wholesale on
/// [`refresh_settings`](Self::refresh_settings); a failed fetch substitutes
/// the complete hard-coded default object, so every consumer can assume
/// [`settings`](Self::settings) is fully populated - no partial or missing
/// fields downstream.
pub struct SettingsStore<B> {
    api: B,
    settings: RwLock<SiteSettings>,
    loaded: RwLock<bool>,
}

impl<B: SettingsApi> SettingsStore<B> {
    /// Create the store with the default configuration in place.
    pub fn new(api: B) -> Self {
        Self {
            api,
            settings: RwLock::new(SiteSettings::default()),
            loaded: RwLock::new(false),
        }
    }

    /// Load the settings object from the backend, falling back to the
    /// default configuration on any failure.
    pub async fn load_settings(&self) {
        let settings = match self.api.fetch_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to load site settings, using defaults");
                SiteSettings::default()
            }
        };

        {
            let mut guard = self
                .settings
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *guard = settings;
        }
        {
            let mut loaded = self
                .loaded
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *loaded = true;
        }
    }

    /// Re-run the load path on demand.
    pub async fn refresh_settings(&self) {
        self.load_settings().await;
    }

    /// The current settings object (always fully populated).
    pub fn settings(&self) -> SiteSettings {
        self.settings
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// True once the initial load (successful or not) has completed.
    pub fn is_loaded(&self) -> bool {
        *self
            .loaded
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeSettings {
        responses: Mutex<Vec<Result<SiteSettings, ApiError>>>,
    }

    impl SettingsApi for &FakeSettings {
        async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn custom_settings() -> SiteSettings {
        SiteSettings {
            site_name: "Інший сад".to_owned(),
            ..SiteSettings::default()
        }
    }

    #[tokio::test]
    async fn test_load_replaces_whole_object() {
        let fake = FakeSettings {
            responses: Mutex::new(vec![Ok(custom_settings())]),
        };
        let store = SettingsStore::new(&fake);

        assert!(!store.is_loaded());
        store.load_settings().await;

        assert!(store.is_loaded());
        assert_eq!(store.settings().site_name, "Інший сад");
    }

    #[tokio::test]
    async fn test_failure_substitutes_full_defaults() {
        let fake = FakeSettings {
            responses: Mutex::new(vec![Err(ApiError::Api {
                status: 500,
                message: "down".into(),
            })]),
        };
        let store = SettingsStore::new(&fake);

        store.load_settings().await;

        assert!(store.is_loaded());
        let settings = store.settings();
        assert_eq!(settings, SiteSettings::default());
        assert!(!settings.phone1.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reruns_load_path() {
        let fake = FakeSettings {
            responses: Mutex::new(vec![
                Err(ApiError::Api {
                    status: 500,
                    message: "down".into(),
                }),
                Ok(custom_settings()),
            ]),
        };
        let store = SettingsStore::new(&fake);

        store.load_settings().await;
        assert_eq!(store.settings(), SiteSettings::default());

        store.refresh_settings().await;
        assert_eq!(store.settings().site_name, "Інший сад");
    }
}
