//! Login, verify, and logout.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use sadok_core::KeyValueStore;

use crate::client::{AdminClient, AdminError, Session, TOKEN_KEY, USERNAME_KEY};
use crate::types::{AdminToken, AdminVerify};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// Log in with username and password.
    ///
    /// On success the bearer token is held in memory and persisted under the
    /// fixed storage keys, so subsequent calls - and future processes - are
    /// authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] on bad credentials, or another
    /// variant if the request fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AdminError> {
        let token: AdminToken = self
            .post_json("/api/admin/login", &LoginRequest { username, password })
            .await?;

        let username = token.username.unwrap_or_else(|| username.to_owned());

        self.storage.save(TOKEN_KEY, &token.access_token)?;
        self.storage.save(USERNAME_KEY, &username)?;
        self.set_session(Some(Session {
            username: username.clone(),
            token: SecretString::from(token.access_token),
        }));

        Ok(username)
    }

    /// Check the held token against the backend.
    ///
    /// A rejected token clears the session and the persisted keys, matching
    /// the panel's behavior of dropping a stale login on startup.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] when no token is held or the
    /// backend rejects it.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> Result<AdminVerify, AdminError> {
        if self.read_session().is_none() {
            return Err(AdminError::Unauthorized("not logged in".to_owned()));
        }

        match self.get_json::<AdminVerify>("/api/admin/verify", &[]).await {
            Ok(verify) => Ok(verify),
            Err(e) => {
                if matches!(e, AdminError::Unauthorized(_)) {
                    self.forget_session();
                }
                Err(e)
            }
        }
    }

    /// Drop the session and the persisted token.
    pub fn logout(&self) {
        self.forget_session();
    }

    fn forget_session(&self) {
        self.set_session(None);
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted admin token");
        }
        if let Err(e) = self.storage.remove(USERNAME_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted admin username");
        }
    }

    /// The raw bearer token, for surfaces that embed it elsewhere.
    pub fn token(&self) -> Option<String> {
        self.read_session()
            .map(|s| s.token.expose_secret().to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use sadok_core::MemoryStore;

    #[test]
    fn test_logout_clears_persisted_session() {
        let storage = MemoryStore::new();
        storage.save(TOKEN_KEY, &"tok-123").unwrap();
        storage.save(USERNAME_KEY, &"admin").unwrap();

        let client = AdminClient::new(
            "http://localhost:8000".parse().unwrap(),
            Duration::from_secs(5),
            storage,
        )
        .unwrap();
        assert!(client.is_authenticated());

        client.logout();

        assert!(!client.is_authenticated());
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_verify_without_session_is_unauthorized() {
        let client = AdminClient::new(
            "http://localhost:8000".parse().unwrap(),
            Duration::from_secs(5),
            MemoryStore::new(),
        )
        .unwrap();

        let result = client.verify().await;
        assert!(matches!(result, Err(AdminError::Unauthorized(_))));
    }
}
