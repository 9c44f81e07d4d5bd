use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// A logged serving. Nutrients are a snapshot taken when it was logged.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FoodLogEntry {
    pub id: i64,
    #[serde(with = "crate::dates::iso_date")]
    pub log_date: Date,
    pub food_id: Option<i64>,
    pub food_name: String,
    pub amount_grams: f64,
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Cached external food, unique per `(api_source, api_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FoodCatalogEntry {
    pub id: i64,
    pub api_source: String,
    pub api_id: String,
    pub name: String,
    pub kcal_per_100: f64,
    pub protein_per_100: f64,
    pub carbs_per_100: f64,
    pub fat_per_100: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, FromRow)]
pub struct DailyTarget {
    pub kcal_target: f64,
    pub protein_target: Option<f64>,
    pub carbs_target: Option<f64>,
    pub fat_target: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, FromRow)]
pub struct MacroTotals {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}
