use anyhow::Result;
use reqwest::Method;

use crate::client::client::RecipeClient;
use crate::client::types::{Recipe, Token};

impl RecipeClient {
    /// Lists every recipe. No authentication needed.
    pub async fn get_all_recipes(&self) -> Result<Option<Vec<Recipe>>> {
        let request = self.request(Method::GET, "/recipes", None);
        let recipes: Option<Vec<Recipe>> = self.fetch_json(request, "list recipes").await?;
        if let Some(recipes) = &recipes {
            tracing::debug!("Successfully retrieved {} recipes", recipes.len());
        }
        Ok(recipes)
    }

    /// Creates `recipe` on the server. Returns `false` if it was rejected.
    pub async fn create_recipe(&self, token: &Token, recipe: &Recipe) -> Result<bool> {
        let request = self.request(Method::POST, "/recipes", Some(token)).json(recipe);
        self.fetch_ok(request, "create recipe").await
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        let path = format!("/recipes/{}", urlencoding::encode(id));
        let request = self.request(Method::GET, &path, None);
        self.fetch_json(request, "get recipe").await
    }

    pub async fn update_recipe(&self, token: &Token, id: &str, recipe: &Recipe) -> Result<bool> {
        let path = format!("/recipes/{}", urlencoding::encode(id));
        let request = self.request(Method::PATCH, &path, Some(token)).json(recipe);
        self.fetch_ok(request, "update recipe").await
    }

    pub async fn delete_recipe(&self, token: &Token, id: &str) -> Result<bool> {
        let path = format!("/recipes/{}", urlencoding::encode(id));
        let request = self.request(Method::DELETE, &path, Some(token));
        self.fetch_ok(request, "delete recipe").await
    }
}
