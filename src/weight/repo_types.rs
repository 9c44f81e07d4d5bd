use serde::Serialize;
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct WeightEntry {
    pub id: i64,
    #[serde(with = "crate::dates::iso_date")]
    pub log_date: Date,
    pub weight: f64,
}
