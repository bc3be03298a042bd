//! Admin API client with bearer-token authentication.

use std::sync::RwLock;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use sadok_core::{KeyValueStore, StorageError};

/// Persistence key for the bearer token (same key the browser panel used).
pub(crate) const TOKEN_KEY: &str = "adminToken";

/// Persistence key for the logged-in username.
pub(crate) const USERNAME_KEY: &str = "adminUsername";

/// Errors that can occur when talking to the admin API.
#[derive(Debug, Error)]
pub enum AdminError {
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

    /// Not logged in, or the token was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the response body.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Token persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub username: String,
    pub token: SecretString,
}

/// Client for the back-office API.
///
/// The bearer token lives in memory and is mirrored to the key-value store
/// under fixed keys, so a restarted process resumes the session without a
/// fresh login.
pub struct AdminClient<S> {
    http: reqwest::Client,
    base_url: String,
    pub(crate) storage: S,
    pub(crate) session: RwLock<Option<Session>>,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// Create an admin client, restoring any persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration, storage: S) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // Restore a persisted session if both keys are present; a corrupt
        // value is treated as "not logged in".
        let token: Option<String> = storage.load(TOKEN_KEY).unwrap_or_default();
        let username: Option<String> = storage.load(USERNAME_KEY).unwrap_or_default();
        let session = match (token, username) {
            (Some(token), Some(username)) => Some(Session {
                username,
                token: SecretString::from(token),
            }),
            _ => None,
        };

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            storage,
            session: RwLock::new(session),
        })
    }

    /// The logged-in username, if a session is active.
    pub fn username(&self) -> Option<String> {
        self.read_session().map(|s| s.username)
    }

    /// True when a token is held (it may still be rejected by the backend;
    /// use [`verify`](Self::verify) to check).
    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_some()
    }

    pub(crate) fn read_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        let mut guard = self
            .session
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = session;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token, if any.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.read_session() {
            Some(session) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", session.token.expose_secret()),
            ),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AdminError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorDetail>(&body)
                .map_or_else(|_| body.chars().take(200).collect::<String>(), |e| e.detail);

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    AdminError::Unauthorized(message)
                }
                reqwest::StatusCode::NOT_FOUND => AdminError::NotFound(message),
                _ => {
                    tracing::error!(
                        status = %status,
                        message = %message,
                        "Admin API returned non-success status"
                    );
                    AdminError::Api {
                        status: status.as_u16(),
                        message,
                    }
                }
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse admin API response"
                );
                Err(AdminError::Parse(e))
            }
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AdminError> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AdminError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AdminError> {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, AdminError> {
        self.send(self.http.delete(self.url(path))).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, AdminError> {
        self.send(self.http.post(self.url(path)).multipart(form))
            .await
    }
}

impl<S> std::fmt::Debug for AdminClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.read().map(|s| s.is_some()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sadok_core::MemoryStore;

    fn base_url() -> Url {
        "http://localhost:8000".parse().unwrap()
    }

    #[test]
    fn test_fresh_client_has_no_session() {
        let client =
            AdminClient::new(base_url(), Duration::from_secs(5), MemoryStore::new()).unwrap();
        assert!(!client.is_authenticated());
        assert!(client.username().is_none());
    }

    #[test]
    fn test_session_restored_from_storage() {
        let storage = MemoryStore::new();
        storage.save(TOKEN_KEY, &"tok-123").unwrap();
        storage.save(USERNAME_KEY, &"admin").unwrap();

        let client = AdminClient::new(base_url(), Duration::from_secs(5), storage).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.username().as_deref(), Some("admin"));
    }

    #[test]
    fn test_token_without_username_is_ignored() {
        let storage = MemoryStore::new();
        storage.save(TOKEN_KEY, &"tok-123").unwrap();

        let client = AdminClient::new(base_url(), Duration::from_secs(5), storage).unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::Unauthorized("token expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized: token expired");
    }
}
