use anyhow::Result;
use reqwest::Method;

use crate::client::client::RecipeClient;
use crate::client::types::{Token, UpdateUser, User, UserList};

impl RecipeClient {
    /// Fetches the user `token` belongs to.
    pub async fn me(&self, token: &Token) -> Result<Option<User>> {
        let request = self.request(Method::GET, "/users/me", Some(token));
        self.fetch_json(request, "current user").await
    }

    /// Applies `patch` to user `id`. Returns whether the server accepted it.
    pub async fn update(&self, token: &Token, id: &str, patch: &UpdateUser) -> Result<bool> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let request = self.request(Method::PATCH, &path, Some(token)).json(patch);
        self.fetch_ok(request, "update user").await
    }

    /// Fetches a single user. Only available for yourself or as an admin.
    pub async fn get_user(&self, token: &Token, id: &str) -> Result<Option<User>> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let request = self.request(Method::GET, &path, Some(token));
        self.fetch_json(request, "get user").await
    }

    /// Lists every account. Admin only.
    pub async fn list_users(&self, token: &Token) -> Result<Option<Vec<User>>> {
        let request = self.request(Method::GET, "/users", Some(token));
        let list: Option<UserList> = self.fetch_json(request, "list users").await?;
        Ok(list.map(|list| list.users))
    }

    pub async fn delete_user(&self, token: &Token, id: &str) -> Result<bool> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let request = self.request(Method::DELETE, &path, Some(token));
        self.fetch_ok(request, "delete user").await
    }
}
