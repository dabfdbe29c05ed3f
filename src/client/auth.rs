//! Login and registration.
//!
//! Both endpoints take the same [`Credentials`] body and answer with an
//! [`AuthToken`]. Registering also logs the new account in, so either call
//! yields a session [`Token`] on success.

use anyhow::Result;
use reqwest::Method;

use crate::client::client::RecipeClient;
use crate::client::types::{AuthToken, Credentials, Token};

impl RecipeClient {
    /// Exchanges credentials for a session token.
    ///
    /// Returns `Ok(None)` when the server rejects the request; the reason is
    /// on the error banner.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<Token>> {
        tracing::info!("Attempting login for user: {}", username);
        self.authenticate("/users/login", "login", username, password)
            .await
    }

    /// Creates an account and returns a session token for it.
    pub async fn register(&self, username: &str, password: &str) -> Result<Option<Token>> {
        tracing::info!("Registering user: {}", username);
        self.authenticate("/users/register", "register", username, password)
            .await
    }

    async fn authenticate(
        &self,
        path: &str,
        what: &str,
        username: &str,
        password: &str,
    ) -> Result<Option<Token>> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.request(Method::POST, path, None).json(&credentials);

        let token = self
            .fetch_json::<AuthToken>(request, what)
            .await?
            .map(|auth| auth.token);

        match &token {
            Some(token) => tracing::info!("{} successful for user: {} ({})", what, username, token.preview()),
            None => tracing::debug!("{} did not yield a token for user: {}", what, username),
        }
        Ok(token)
    }
}
