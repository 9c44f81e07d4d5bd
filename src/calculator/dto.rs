use serde::Deserialize;

use super::services::ProfileInput;
use crate::nutrition::convert::deserialize_lenient;

/// Calculator form. Numeric fields may be sent as strings.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub birth_year: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub height_cm: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub activity_level_id: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub goal_id: Option<f64>,
}

impl From<CalculateRequest> for ProfileInput {
    fn from(req: CalculateRequest) -> Self {
        // fractional years and ids truncate, as a form would
        ProfileInput {
            sex: req.sex,
            birth_year: req.birth_year.map(|v| v as i32),
            height_cm: req.height_cm,
            weight_kg: req.weight_kg,
            activity_level_id: req.activity_level_id.map(|v| v as i64),
            goal_id: req.goal_id.map(|v| v as i64),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdoptTargetRequest {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub kcal_target: Option<f64>,
}
