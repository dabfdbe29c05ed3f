//! # Recipe Server HTTP Client
//!
//! Typed wrappers around the recipe server's REST API.
//!
//! ## Modules
//!
//! - [`client`] - [`RecipeClient`] and the shared request/response handling
//! - [`auth`] - Login and registration
//! - [`users`] - Current user, user updates and admin user management
//! - [`recipes`] - Listing, creating and editing recipes
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_client::client::RecipeClient;
//! use recipe_client::error::ErrorReporter;
//! use recipe_client::navigation::Navigation;
//! use recipe_client::routing::ServerRoutes;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let reporter = ErrorReporter::new(Navigation::default());
//! let client = RecipeClient::new(ServerRoutes::new("http://localhost:3000/"), reporter.clone());
//!
//! match client.login("username", "password").await? {
//!     Some(token) => {
//!         let recipes = client.get_all_recipes().await?.unwrap_or_default();
//!         println!("Logged in as {:?}, {} recipes", token, recipes.len());
//!     }
//!     None => println!("Login failed: {:?}", reporter.current()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod recipes;
pub mod types;
pub mod users;

pub use client::RecipeClient;
pub use types::*;
