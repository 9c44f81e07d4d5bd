use sqlx::SqlitePool;
use uuid::Uuid;

use super::repo_types::{ActivityLevel, Goal, UserProfile};

pub async fn list_activity_levels(db: &SqlitePool) -> Result<Vec<ActivityLevel>, sqlx::Error> {
    sqlx::query_as::<_, ActivityLevel>(
        "SELECT id, name, multiplier FROM activity_levels ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn list_goals(db: &SqlitePool) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT id, name, kcal_adjustment FROM goals ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn find_activity_level(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<ActivityLevel>, sqlx::Error> {
    sqlx::query_as::<_, ActivityLevel>(
        "SELECT id, name, multiplier FROM activity_levels WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_goal(db: &SqlitePool, id: i64) -> Result<Option<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT id, name, kcal_adjustment FROM goals WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn get_profile(db: &SqlitePool, user_id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT sex, birth_year, height_cm, activity_level_id, goal_id
        FROM user_profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Insert the profile or replace every field of the existing one.
pub async fn upsert_profile(
    db: &SqlitePool,
    user_id: Uuid,
    profile: &UserProfile,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, sex, birth_year, height_cm, activity_level_id, goal_id)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            sex = excluded.sex,
            birth_year = excluded.birth_year,
            height_cm = excluded.height_cm,
            activity_level_id = excluded.activity_level_id,
            goal_id = excluded.goal_id,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(user_id)
    .bind(&profile.sex)
    .bind(profile.birth_year)
    .bind(profile.height_cm)
    .bind(profile.activity_level_id)
    .bind(profile.goal_id)
    .execute(db)
    .await?;
    Ok(())
}
