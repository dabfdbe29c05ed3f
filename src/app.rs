//! Application shell.
//!
//! [`App`] owns the state the UI observes (session token, error banner,
//! location) and a [`RecipeClient`] wired to it, and implements the flows
//! that touch more than one of them.

use anyhow::Result;

use crate::client::types::{Token, User};
use crate::client::RecipeClient;
use crate::config::Config;
use crate::error::ErrorReporter;
use crate::navigation::Navigation;
use crate::routing::ServerRoutes;
use crate::token::{FileTokenStorage, TokenStorage, TokenStore};

#[derive(Debug, Clone)]
pub struct App {
    config: Config,
    tokens: TokenStore,
    navigation: Navigation,
    reporter: ErrorReporter,
    client: RecipeClient,
}

impl App {
    /// Builds the shell with the token persisted at `config.token_path`.
    pub fn from_config(config: Config) -> Self {
        let storage = FileTokenStorage::new(config.token_path.clone());
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: Config, storage: impl TokenStorage + 'static) -> Self {
        let navigation = Navigation::default();
        let reporter = ErrorReporter::new(navigation.clone());
        Self::assemble(config, TokenStore::load(storage), navigation, reporter)
    }

    /// Wires pre-built parts together, for shells that configure them differently.
    pub fn assemble(
        config: Config,
        tokens: TokenStore,
        navigation: Navigation,
        reporter: ErrorReporter,
    ) -> Self {
        let client = RecipeClient::new(ServerRoutes::new(config.server_url.clone()), reporter.clone());
        Self {
            config,
            tokens,
            navigation,
            reporter,
            client,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn client(&self) -> &RecipeClient {
        &self.client
    }

    /// Logs in, stores the session and returns to where the user came from.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        let token = self.client.login(username, password).await?;
        Ok(self.start_session(token))
    }

    /// Registers a new account and starts a session for it.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool> {
        let token = self.client.register(username, password).await?;
        Ok(self.start_session(token))
    }

    pub fn logout(&self) {
        self.tokens.logout();
    }

    /// The logged-in user, or `None` when there is no session.
    pub async fn current_user(&self) -> Result<Option<User>> {
        let Some(token) = self.tokens.get() else {
            return Ok(None);
        };
        self.client.me(&token).await
    }

    fn start_session(&self, token: Option<Token>) -> bool {
        let Some(token) = token else {
            return false;
        };
        self.tokens.login(token);
        self.navigation.navigate(self.navigation.take_return_path());
        true
    }
}
