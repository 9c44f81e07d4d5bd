use serde::Serialize;
use sqlx::SqlitePool;
use time::Date;
use uuid::Uuid;

use crate::clients::{Recipe, RecipeSource};
use crate::dates::week_start;
use crate::error::AppResult;
use crate::nutrition::services::{remaining_kcal, Remaining};
use crate::recipes::services::recipes_of_the_day;
use crate::weight::{repo as weight_repo, repo_types::WeightEntry};
use crate::workouts::{repo as workout_repo, repo_types::Workout};

pub const WEIGHT_HISTORY: i64 = 30;
pub const RECENT_WORKOUTS: i64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    #[serde(with = "crate::dates::iso_date")]
    pub today: Date,
    pub latest_weight: Option<WeightEntry>,
    pub weight_logs: Vec<WeightEntry>,
    pub workouts_this_week: i64,
    pub recent_workouts: Vec<Workout>,
    pub kcal: Remaining,
    pub recipes_of_the_day: Vec<Recipe>,
}

pub async fn dashboard(
    db: &SqlitePool,
    recipes: &dyn RecipeSource,
    user_id: Uuid,
    today: Date,
) -> AppResult<Dashboard> {
    let weight_logs = weight_repo::list(db, user_id, Some(WEIGHT_HISTORY)).await?;
    Ok(Dashboard {
        today,
        latest_weight: weight_logs.first().cloned(),
        weight_logs,
        workouts_this_week: workout_repo::count_since(db, user_id, week_start(today)).await?,
        recent_workouts: workout_repo::recent(db, user_id, RECENT_WORKOUTS).await?,
        kcal: remaining_kcal(db, user_id, today).await?,
        recipes_of_the_day: recipes_of_the_day(recipes).await,
    })
}
