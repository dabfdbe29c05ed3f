//! Client-side location tracking.
//!
//! The error reporter uses this to send the user to the login view after an
//! unauthorized response, remembering where they came from so the shell can
//! return them there once they have logged in again.

use std::sync::Arc;

use tokio::sync::watch;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Where the UI currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Path to go back to after authenticating, set by a login redirect
    pub return_to: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            return_to: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigation {
    location: Arc<watch::Sender<Location>>,
}

impl Navigation {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(Location::new(initial_path));
        Self {
            location: Arc::new(tx),
        }
    }

    pub fn current(&self) -> Location {
        self.location.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.location.subscribe()
    }

    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!("Navigating to {}", path);
        self.location.send_replace(Location::new(path));
    }

    /// Replaces the current location with the login view, recording the
    /// current path as the return target.
    pub fn redirect_to_login(&self) {
        self.location.send_modify(|location| {
            if location.path == LOGIN_PATH {
                return;
            }
            tracing::info!("Redirecting to login from {}", location.path);
            let from = std::mem::replace(&mut location.path, LOGIN_PATH.to_string());
            location.return_to = Some(from);
        });
    }

    /// Takes the recorded return path, defaulting to the home view.
    pub fn take_return_path(&self) -> String {
        let mut taken = None;
        self.location.send_modify(|location| taken = location.return_to.take());
        taken.unwrap_or_else(|| HOME_PATH.to_string())
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}
