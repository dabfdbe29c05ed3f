//! URL construction against the configured recipe server.

/// Base URL of the recipe server, used to build absolute request URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRoutes {
    base_url: String,
}

impl ServerRoutes {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    ///
    /// Up to two doubled slashes are collapsed, after which a scheme that lost
    /// one of its slashes (`http:/host`) is repaired. This is string fixing,
    /// not URL parsing: query strings, fragments and runs of three or more
    /// slashes are left alone.
    ///
    /// ```
    /// use recipe_client::routing::ServerRoutes;
    ///
    /// let routes = ServerRoutes::new("http://x.com/");
    /// assert_eq!(routes.route("/recipes"), "http://x.com/recipes");
    /// ```
    pub fn route(&self, path: &str) -> String {
        let joined = format!("{}{}", self.base_url, path);
        let collapsed = joined.replacen("//", "/", 1).replacen("//", "/", 1);
        repair_scheme(collapsed)
    }
}

fn repair_scheme(url: String) -> String {
    match url.find(":/") {
        Some(idx) if !url[idx + 2..].starts_with('/') => {
            format!("{}://{}", &url[..idx], &url[idx + 2..])
        }
        _ => url,
    }
}
