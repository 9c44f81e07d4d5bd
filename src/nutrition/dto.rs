use serde::{Deserialize, Serialize};
use time::Date;

use super::convert::{deserialize_lenient, Per100g};
use super::services::{LogFoodInput, TargetInput};

/// Body of `POST /food/log`. Numbers may arrive as strings from form posts.
#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub grams: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub kcal_100g: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub protein_100g: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub carbs_100g: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub fat_100g: Option<f64>,
    #[serde(default)]
    pub api_source: Option<String>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub log_date: Option<Date>,
}

impl From<LogFoodRequest> for LogFoodInput {
    fn from(req: LogFoodRequest) -> Self {
        LogFoodInput {
            name: req.name,
            // missing or unparsable grams fail the > 0 check
            grams: req.grams.unwrap_or(f64::NAN),
            per_100g: Per100g {
                kcal: req.kcal_100g,
                protein: req.protein_100g,
                carbs: req.carbs_100g,
                fat: req.fat_100g,
            },
            api_source: req.api_source,
            api_id: req.api_id,
            log_date: req.log_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetRequest {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub kcal_target: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub protein_target: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub carbs_target: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub fat_target: Option<f64>,
}

impl From<TargetRequest> for TargetInput {
    fn from(req: TargetRequest) -> Self {
        TargetInput {
            kcal: req.kcal_target,
            protein: req.protein_target,
            carbs: req.carbs_target,
            fat: req.fat_target,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
    #[serde(with = "crate::dates::iso_date")]
    pub log_date: Date,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn log_request_accepts_form_style_strings() {
        let req: LogFoodRequest = serde_json::from_value(json!({
            "name": "Peanut butter",
            "grams": "15",
            "kcal_100g": "588",
            "protein_100g": 25,
            "carbs_100g": "",
            "api_id": "123",
            "log_date": "2024-05-01"
        }))
        .unwrap();
        let input = LogFoodInput::from(req);
        assert_eq!(input.grams, 15.0);
        assert_eq!(input.per_100g.kcal, Some(588.0));
        assert_eq!(input.per_100g.protein, Some(25.0));
        assert_eq!(input.per_100g.carbs, None);
        assert_eq!(input.per_100g.fat, None);
        assert_eq!(input.log_date, Some(date!(2024 - 05 - 01)));
    }

    #[test]
    fn blank_log_date_means_today() {
        let req: LogFoodRequest =
            serde_json::from_value(json!({ "name": "Apple", "grams": 100, "log_date": "" }))
                .unwrap();
        assert_eq!(req.log_date, None);
    }

    #[test]
    fn missing_grams_is_not_a_number() {
        let req: LogFoodRequest = serde_json::from_value(json!({ "name": "Apple" })).unwrap();
        assert!(LogFoodInput::from(req).grams.is_nan());
    }
}
