//! Runtime configuration read from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Backend bind address used when `RECIPE_SERVER_URL` is unset.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/";

/// Token file used when `RECIPE_TOKEN_FILE` is unset.
pub const DEFAULT_TOKEN_FILE: &str = ".recipe-client/session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL every request path is appended to
    pub server_url: String,
    /// File holding the persisted auth token
    pub token_path: PathBuf,
}

impl Config {
    pub fn new(server_url: impl Into<String>, token_path: impl Into<PathBuf>) -> Result<Self> {
        let server_url = server_url.into();
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            anyhow::bail!(
                "Recipe server URL must start with http:// or https://, got: {}",
                server_url
            );
        }

        Ok(Self {
            server_url,
            token_path: token_path.into(),
        })
    }

    /// Reads `RECIPE_SERVER_URL` and `RECIPE_TOKEN_FILE`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let server_url =
            env::var("RECIPE_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let token_path =
            env::var("RECIPE_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string());

        Self::new(server_url, token_path)
    }
}
