use anyhow::Result;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::types::Token;
use crate::error::ErrorReporter;
use crate::routing::ServerRoutes;

/// HTTP client for the recipe server.
///
/// Every operation returns `Ok` with either the typed value or a sentinel
/// (`None` / `false`). Non-success responses are handed to the
/// [`ErrorReporter`] before the sentinel is returned; only transport
/// failures surface as `Err`.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    routes: ServerRoutes,
    client: Client,
    reporter: ErrorReporter,
}

impl RecipeClient {
    pub fn new(routes: ServerRoutes, reporter: ErrorReporter) -> Self {
        Self {
            routes,
            client: Client::new(),
            reporter,
        }
    }

    pub fn routes(&self) -> &ServerRoutes {
        &self.routes
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Starts a request to `path`, authorized with `token` when given.
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&Token>) -> RequestBuilder {
        let url = self.routes.route(path);
        tracing::debug!("Making {} request to: {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        match token {
            Some(token) => {
                tracing::debug!("Using authentication token: {}", token.preview());
                builder.header(header::AUTHORIZATION, auth_header(token))
            }
            None => builder,
        }
    }

    /// Sends the request and reports a non-success status.
    ///
    /// Returns `None` once a failure has been reported.
    async fn execute(&self, request: RequestBuilder, what: &str) -> Result<Option<Response>> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Network error during {}: {}", what, e);
            anyhow::anyhow!(
                "Failed to reach recipe server at {}: {}",
                self.routes.base_url(),
                e
            )
        })?;

        let status = response.status();
        tracing::debug!("{} response status: {}", what, status);

        if !status.is_success() {
            self.reporter.report_fetch_error(response, true).await;
            return Ok(None);
        }
        Ok(Some(response))
    }

    /// Sends the request and parses a JSON body, treating "no data" as `None`.
    pub(crate) async fn fetch_json<T>(&self, request: RequestBuilder, what: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(response) = self.execute(request, what).await? else {
            return Ok(None);
        };
        read_json(response, what).await
    }

    /// Sends the request and reports only whether it succeeded.
    pub(crate) async fn fetch_ok(&self, request: RequestBuilder, what: &str) -> Result<bool> {
        Ok(self.execute(request, what).await?.is_some())
    }
}

/// The server's extractor strips a literal `Bearer:` prefix.
pub(crate) fn auth_header(token: &Token) -> String {
    format!("Bearer: {}", token.as_str())
}

async fn read_json<T>(response: Response, what: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let body = response.text().await.map_err(|e| {
        tracing::error!("Failed to read {} response: {}", what, e);
        anyhow::anyhow!("Failed to read response from recipe server: {}", e)
    })?;

    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            if !body.trim().is_empty() {
                tracing::warn!("Ignoring malformed {} response: {}", what, e);
            }
            return Ok(None);
        }
    };

    if is_empty_body(&value) {
        tracing::debug!("{} response carried no data", what);
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!("Unexpected {} response shape: {}", what, e);
            Ok(None)
        }
    }
}

/// `null` and `{}` both mean the server had nothing to return.
pub(crate) fn is_empty_body(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
