//! Third-party catalogs the service reads from.
//!
//! Each source sits behind a trait so handlers and the catalog import can be
//! exercised against in-process fakes.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod exercisedb;
pub mod mealdb;
pub mod openfoodfacts;

pub use exercisedb::ExerciseDbClient;
pub use mealdb::MealDbClient;
pub use openfoodfacts::OpenFoodFactsClient;

/// One exercise as returned by the exercise catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body_part: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
}

#[async_trait]
pub trait ExerciseSource: Send + Sync {
    /// An empty page signals the end of the catalog.
    async fn fetch_page(&self, offset: u32, limit: u32) -> anyhow::Result<Vec<ExerciseRecord>>;
}

/// A recipe record. Only the id is relied upon; everything else is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Recipe {
    /// `(ingredient, measure)` pairs from the numbered `strIngredientN`/`strMeasureN` fields.
    pub fn ingredients(&self) -> Vec<(String, String)> {
        (1..=20)
            .filter_map(|n| {
                let ingredient = self
                    .extra
                    .get(&format!("strIngredient{}", n))
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())?;
                let measure = self
                    .extra
                    .get(&format!("strMeasure{}", n))
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .unwrap_or_default();
                Some((ingredient.to_string(), measure.to_string()))
            })
            .collect()
    }
}

#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn search_by_name(&self, name: &str) -> anyhow::Result<Vec<Recipe>>;
    async fn search_by_first_letter(&self, letter: char) -> anyhow::Result<Vec<Recipe>>;
    async fn lookup_by_id(&self, id: &str) -> anyhow::Result<Option<Recipe>>;
    async fn random(&self) -> anyhow::Result<Option<Recipe>>;
}

/// Nutrient values per 100 g of a packaged product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub kcal_100g: Option<f64>,
    pub protein_100g: Option<f64>,
    pub carbs_100g: Option<f64>,
    pub fat_100g: Option<f64>,
}

#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn lookup(&self, barcode: &str) -> anyhow::Result<Option<Product>>;
}

pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("fittrack/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client")
}

/// Host part of a base url, used for the `x-rapidapi-host` header.
pub(crate) fn host_of(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}
