use serde::Serialize;
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Workout {
    pub id: i64,
    #[serde(with = "crate::dates::iso_date")]
    pub workout_date: Date,
    pub workout_type: String,
    pub notes: String,
}

/// An exercise performed in a workout, joined to its catalog name.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct WorkoutItem {
    pub id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub items: Vec<WorkoutItem>,
}
