use sqlx::SqlitePool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{Workout, WorkoutItem};

pub async fn insert(
    db: &SqlitePool,
    user_id: Uuid,
    workout_date: Date,
    workout_type: &str,
    notes: &str,
) -> Result<Workout, sqlx::Error> {
    sqlx::query_as::<_, Workout>(
        r#"
        INSERT INTO workouts (user_id, workout_date, workout_type, notes)
        VALUES (?, ?, ?, ?)
        RETURNING id, workout_date, workout_type, notes
        "#,
    )
    .bind(user_id)
    .bind(workout_date)
    .bind(workout_type)
    .bind(notes)
    .fetch_one(db)
    .await
}

/// Most recent first.
pub async fn recent(db: &SqlitePool, user_id: Uuid, limit: i64) -> Result<Vec<Workout>, sqlx::Error> {
    sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, workout_date, workout_type, notes
        FROM workouts
        WHERE user_id = ?
        ORDER BY workout_date DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn count_since(db: &SqlitePool, user_id: Uuid, since: Date) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM workouts WHERE user_id = ? AND workout_date >= ?")
            .bind(user_id)
            .bind(since)
            .fetch_one(db)
            .await?;
    Ok(n)
}

pub async fn find_owned(
    db: &SqlitePool,
    user_id: Uuid,
    workout_id: i64,
) -> Result<Option<Workout>, sqlx::Error> {
    sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, workout_date, workout_type, notes
        FROM workouts
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(workout_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Items in the order they were added.
pub async fn items(db: &SqlitePool, workout_id: i64) -> Result<Vec<WorkoutItem>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutItem>(
        r#"
        SELECT we.id, we.exercise_id, e.name, we.sets, we.reps, we.weight
        FROM workout_exercises we
        JOIN exercises e ON e.id = we.exercise_id
        WHERE we.workout_id = ?
        ORDER BY we.id ASC
        "#,
    )
    .bind(workout_id)
    .fetch_all(db)
    .await
}

/// Fails with a unique violation when the exercise is already in the workout.
pub async fn insert_item(
    db: &SqlitePool,
    workout_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    weight: Option<f64>,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(workout_id)
    .bind(exercise_id)
    .bind(sets)
    .bind(reps)
    .bind(weight)
    .fetch_one(db)
    .await?;
    Ok(id)
}
