//! Type definitions for the recipe server API.
//!
//! ## Key Types
//!
//! - [`Recipe`] - A recipe with its ingredients, instructions and timings
//! - [`User`] - An account, with the ids of the recipes it owns
//! - [`UpdateUser`] - Partial patch for a user's mutable fields
//! - [`Token`] - Opaque session credential returned by login and register
//!
//! ## API Compatibility
//!
//! The server stores documents in MongoDB and sends identifiers in extended
//! JSON form (`"_id": {"$oid": "..."}`). [`User`] and [`Recipe`] unwrap that
//! into a flat `id` string on the way in and send `id` on the way out.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque bearer credential for an authenticated session.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First ten characters, for logging.
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(10).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.preview()).finish()
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Body for the login and register endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login/register response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: Token,
}

/// A user account as returned by `/users/me` and `/users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Flat identifier, unwrapped from the server's `_id.$oid`
    #[serde(alias = "_id", default, deserialize_with = "object_id")]
    pub id: Option<String>,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub admin: bool,
    /// Ids of recipes this user owns
    #[serde(default, deserialize_with = "object_ids")]
    pub recipes: Vec<String>,
}

/// Partial user update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `GET /users` response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Server-assigned id; omitted when creating a recipe
    #[serde(
        alias = "_id",
        default,
        deserialize_with = "object_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub servings: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    /// Minutes
    pub prep_time: u32,
    /// Minutes
    pub cook_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub title: String,
    pub note: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Measurement,
}

/// Unit tag for a [`Quantity`]. Units are never converted into one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "dl")]
    Decilitre,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "tbs")]
    Tablespoon,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "gl")]
    Gallon,
    #[serde(rename = "qt")]
    Quart,
    #[serde(rename = "pt")]
    Pint,
    #[serde(rename = "cup")]
    Cup,
}

/// What a [`Measurement`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Mass,
    MetricVolume,
    Spoon,
    ImperialVolume,
}

impl Measurement {
    pub const ALL: [Measurement; 12] = [
        Measurement::Kilogram,
        Measurement::Gram,
        Measurement::Milligram,
        Measurement::Litre,
        Measurement::Decilitre,
        Measurement::Millilitre,
        Measurement::Tablespoon,
        Measurement::Teaspoon,
        Measurement::Gallon,
        Measurement::Quart,
        Measurement::Pint,
        Measurement::Cup,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            Self::Kilogram | Self::Gram | Self::Milligram => Dimension::Mass,
            Self::Litre | Self::Decilitre | Self::Millilitre => Dimension::MetricVolume,
            Self::Tablespoon | Self::Teaspoon => Dimension::Spoon,
            Self::Gallon | Self::Quart | Self::Pint | Self::Cup => Dimension::ImperialVolume,
        }
    }

    /// Short name used on the wire.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Litre => "l",
            Self::Decilitre => "dl",
            Self::Millilitre => "ml",
            Self::Tablespoon => "tbs",
            Self::Teaspoon => "tsp",
            Self::Gallon => "gl",
            Self::Quart => "qt",
            Self::Pint => "pt",
            Self::Cup => "cup",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Identifier as sent by the server: either extended JSON or a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectId {
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        match id {
            ObjectId::Extended { oid } => oid,
            ObjectId::Plain(id) => id,
        }
    }
}

fn object_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<ObjectId>::deserialize(deserializer)?;
    Ok(id.map(String::from))
}

fn object_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<ObjectId>::deserialize(deserializer)?;
    Ok(ids.into_iter().map(String::from).collect())
}
