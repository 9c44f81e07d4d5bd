use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ActivityLevel {
    pub id: i64,
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub kcal_adjustment: f64,
}

/// Last submitted calculator inputs, one row per user.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserProfile {
    pub sex: String,
    pub birth_year: i32,
    pub height_cm: f64,
    pub activity_level_id: i64,
    pub goal_id: i64,
}
