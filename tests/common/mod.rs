#![allow(dead_code)]

use recipe_client::client::types::{Ingredient, Measurement, Quantity, Recipe, Token};
use recipe_client::token::{MemoryTokenStorage, TOKEN_STORAGE_KEY, TokenStorage};
use recipe_client::{App, Config, RecipeClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "7f1c9a52-0d6b-4a8e-9b43-2c5e8d1f6a90";

pub struct TestEnvironment {
    pub server: MockServer,
    pub storage: MemoryTokenStorage,
    pub app: App,
}

impl TestEnvironment {
    /// Shell pointed at a fresh mock server, with no stored session.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let storage = MemoryTokenStorage::new();
        let config = Config::new(server.uri(), "unused-session.json")
            .expect("mock server uri should be http");
        let app = App::with_storage(config, storage.clone());

        Self {
            server,
            storage,
            app,
        }
    }

    /// Same as [`TestEnvironment::new`] but with a session already persisted.
    pub async fn logged_in() -> Self {
        let server = MockServer::start().await;
        let storage = MemoryTokenStorage::new();
        storage
            .store(TOKEN_STORAGE_KEY, TEST_TOKEN)
            .expect("memory storage never fails");
        let config = Config::new(server.uri(), "unused-session.json")
            .expect("mock server uri should be http");
        let app = App::with_storage(config, storage.clone());

        Self {
            server,
            storage,
            app,
        }
    }

    pub fn client(&self) -> &RecipeClient {
        self.app.client()
    }

    pub fn banner(&self) -> Option<String> {
        self.app.reporter().current()
    }
}

pub fn token() -> Token {
    Token::new(TEST_TOKEN)
}

pub fn bearer() -> String {
    format!("Bearer: {}", TEST_TOKEN)
}

pub fn sample_recipe() -> Recipe {
    Recipe {
        id: None,
        title: "Pancakes".to_string(),
        description: "Thin Swedish pancakes".to_string(),
        servings: "4".to_string(),
        ingredients: vec![
            Ingredient {
                title: "Flour".to_string(),
                note: "plain".to_string(),
                quantity: Quantity {
                    value: 2.5,
                    unit: Measurement::Decilitre,
                },
            },
            Ingredient {
                title: "Salt".to_string(),
                note: String::new(),
                quantity: Quantity {
                    value: 0.5,
                    unit: Measurement::Teaspoon,
                },
            },
        ],
        instructions: vec![
            "Whisk flour and half the milk".to_string(),
            "Add the rest and fry thinly".to_string(),
        ],
        tags: vec!["breakfast".to_string()],
        categories: vec!["sweet".to_string()],
        prep_time: 10,
        cook_time: 20,
    }
}

/// A recipe as the server sends it back, with an extended-JSON id.
pub fn recipe_json(oid: &str) -> Value {
    json!({
        "_id": { "$oid": oid },
        "title": "Pancakes",
        "description": "Thin Swedish pancakes",
        "servings": "4",
        "ingredients": [
            { "title": "Flour", "note": "plain", "quantity": { "value": 2.5, "unit": "dl" } },
            { "title": "Salt", "note": "", "quantity": { "value": 0.5, "unit": "tsp" } }
        ],
        "instructions": ["Whisk flour and half the milk", "Add the rest and fry thinly"],
        "tags": ["breakfast"],
        "categories": ["sweet"],
        "prep_time": 10,
        "cook_time": 20
    })
}

/// A user as the server sends it, with an extended-JSON id.
pub fn user_json(oid: &str, username: &str) -> Value {
    json!({
        "_id": { "$oid": oid },
        "username": username,
        "display_name": username.to_uppercase(),
        "hashed_password": "",
        "admin": false,
        "recipes": [],
        "tokens": []
    })
}
