use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Breed {
    pub id: i32,
    pub breed: String,
    pub subbreed: bool,
    pub votes: i32,
    pub image: Vec<String>,
}

/// Payload for inserting a row. Fields other than `breed` fall back to the
/// column defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBreed {
    pub breed: String,
    #[serde(default)]
    pub subbreed: bool,
    #[serde(default)]
    pub votes: i32,
    #[serde(default)]
    pub image: Vec<String>,
}

impl NewBreed {
    /// Build a seeded row from a catalog path such as `spaniel/cocker`.
    /// Every `/` becomes `-` in the stored name.
    pub fn from_catalog_path(path: &str, image: Vec<String>) -> Self {
        Self {
            breed: normalize_breed_name(path),
            subbreed: path.contains('/'),
            votes: 0,
            image,
        }
    }
}

pub fn normalize_breed_name(path: &str) -> String {
    path.replace('/', "-")
}
