//! Transient error banner and HTTP failure reporting.
//!
//! [`ErrorReporter`] owns the message shown to the user. Each report replaces
//! the message and restarts an auto-clear timer; the message disappears
//! [`ERROR_DISPLAY_DURATION`] after the most recent report. Failed HTTP
//! responses are turned into a message by [`FetchFailure::classify`].

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::{Response, StatusCode};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::navigation::Navigation;

/// How long a reported message stays visible.
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(8);

/// Display category for a failed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server sent its own explanation in the body
    ServerMessage(String),
    ServerError,
    Unauthorized,
    NotFound,
    BadRequest,
    Unknown,
}

impl FetchFailure {
    /// Picks the message for a failed response.
    ///
    /// A body that is neither empty nor the literal `null` always wins;
    /// otherwise the status decides.
    pub fn classify(status: StatusCode, body: &str) -> Self {
        if !body.is_empty() && body != "null" {
            return Self::ServerMessage(body.to_string());
        }

        match status.as_u16() {
            500..=599 => Self::ServerError,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400 => Self::BadRequest,
            _ => Self::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ServerMessage(text) => text,
            Self::ServerError => "server error",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::BadRequest => "bad request",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Shared handle onto the error banner.
#[derive(Clone)]
pub struct ErrorReporter {
    inner: Arc<ReporterInner>,
}

struct ReporterInner {
    message: watch::Sender<Option<String>>,
    clear: Mutex<PendingClear>,
    navigation: Navigation,
    display_for: Duration,
}

#[derive(Default)]
struct PendingClear {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ErrorReporter {
    pub fn new(navigation: Navigation) -> Self {
        Self::with_display_duration(navigation, ERROR_DISPLAY_DURATION)
    }

    pub fn with_display_duration(navigation: Navigation, display_for: Duration) -> Self {
        let (message, _) = watch::channel(None);
        Self {
            inner: Arc::new(ReporterInner {
                message,
                clear: Mutex::new(PendingClear::default()),
                navigation,
                display_for,
            }),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.inner.message.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.message.subscribe()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.inner.navigation
    }

    /// Shows `text` and (re)starts the auto-clear timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn report_error(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!("{}", text);

        let mut pending = self.inner.clear.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);
        self.inner.message.send_replace(Some(text));

        let generation = pending.generation;
        let inner = Arc::clone(&self.inner);
        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.display_for).await;
            let mut pending = inner.clear.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer report owns the banner now.
            if pending.generation != generation {
                return;
            }
            pending.handle = None;
            inner.message.send_replace(None);
        }));
    }

    /// Reports a failed response, consuming its body.
    ///
    /// On 401 with an empty body and `login_on_unauthorized` set, the user is
    /// also redirected to the login view. Returns the category that was
    /// reported.
    pub async fn report_fetch_error(
        &self,
        response: Response,
        login_on_unauthorized: bool,
    ) -> FetchFailure {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Could not read error response body ({}): {}", status, e);
                String::new()
            }
        };
        tracing::debug!("Request failed with status {}", status);

        let failure = FetchFailure::classify(status, &body);
        self.report_error(failure.message());

        if failure == FetchFailure::Unauthorized && login_on_unauthorized {
            self.inner.navigation.redirect_to_login();
        }
        failure
    }

    /// Drops the current message and any pending clear.
    pub fn dismiss(&self) {
        let mut pending = self.inner.clear.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);
        self.inner.message.send_replace(None);
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("message", &self.current())
            .field("display_for", &self.inner.display_for)
            .finish_non_exhaustive()
    }
}
