//! # Recipe Client Library
//!
//! Client-side data access for the recipe manager: typed wrappers around the
//! recipe server's HTTP API plus the small amount of state the UI observes.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client for recipes, users and authentication
//! - [`error`] - Error banner with auto-clear, and HTTP failure reporting
//! - [`token`] - Session token persisted across restarts
//! - [`navigation`] - Current location and the login redirect
//! - [`routing`] - Absolute URLs from the configured server base
//! - [`config`] - Environment configuration
//! - [`app`] - Shell tying the above together
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_client::{App, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = App::from_config(Config::from_env()?);
//!
//! if !app.tokens().is_logged_in() {
//!     app.login("username", "password").await?;
//! }
//! let recipes = app.client().get_all_recipes().await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod routing;
pub mod token;

pub use app::App;
pub use client::RecipeClient;
pub use config::Config;
pub use error::{ErrorReporter, FetchFailure};
pub use token::TokenStore;
