use serde::{Deserialize, Serialize};
use time::Date;

use super::services::AddExerciseInput;
use crate::nutrition::convert::deserialize_lenient;

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub workout_date: Option<Date>,
    #[serde(default)]
    pub workout_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sets and reps must be whole numbers; a fractional value counts as missing.
#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub exercise_id: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub sets: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub reps: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub weight: Option<f64>,
}

fn whole(value: Option<f64>) -> Option<i64> {
    value.filter(|v| v.fract() == 0.0).map(|v| v as i64)
}

impl From<AddExerciseRequest> for AddExerciseInput {
    fn from(req: AddExerciseRequest) -> Self {
        AddExerciseInput {
            exercise_id: whole(req.exercise_id),
            sets: whole(req.sets),
            reps: whole(req.reps),
            weight: req.weight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ExerciseHit {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ExerciseSearchResponse {
    pub results: Vec<ExerciseHit>,
}
