//! Per-100 g nutrient values to concrete servings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Nutrient amount in `grams` of a food that holds `per_100g` per 100 g.
///
/// Unknown values convert to `0.0` so logged entries always carry numbers.
/// Non-positive `grams` are rejected by callers before conversion.
pub fn per_serving(per_100g: Option<f64>, grams: f64) -> f64 {
    match per_100g {
        Some(v) if v.is_finite() && grams.is_finite() => round2(v * grams / 100.0),
        _ => 0.0,
    }
}

/// A number or a numeric string; anything else is unknown.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// `#[serde(deserialize_with = ...)]` counterpart of [`lenient_f64`].
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_f64))
}

/// Per-100 g values of one food, each possibly unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Per100g {
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Nutrients of one logged serving.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Serving {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Per100g {
    pub fn serving(&self, grams: f64) -> Serving {
        Serving {
            kcal: per_serving(self.kcal, grams),
            protein: per_serving(self.protein, grams),
            carbs: per_serving(self.carbs, grams),
            fat: per_serving(self.fat, grams),
        }
    }

    /// Unknowns stored as zero in the food catalog.
    pub fn or_zero(&self) -> [f64; 4] {
        [
            self.kcal.unwrap_or(0.0),
            self.protein.unwrap_or(0.0),
            self.carbs.unwrap_or(0.0),
            self.fat.unwrap_or(0.0),
        ]
    }
}
