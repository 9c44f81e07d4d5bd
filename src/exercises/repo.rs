use sqlx::{Sqlite, SqlitePool, Transaction};

use super::repo_types::{Exercise, NewExercise};

pub const SEARCH_LIMIT: i64 = 25;

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
        .fetch_one(db)
        .await?;
    Ok(n)
}

/// Returns whether a row was inserted; existing names are left untouched.
pub async fn insert_or_ignore_tx(
    tx: &mut Transaction<'_, Sqlite>,
    exercise: &NewExercise,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO exercises (name, muscle_group, equipment) VALUES (?, ?, ?)",
    )
    .bind(&exercise.name)
    .bind(&exercise.muscle_group)
    .bind(&exercise.equipment)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<Exercise>, sqlx::Error> {
    sqlx::query_as::<_, Exercise>(
        "SELECT id, name, muscle_group, equipment FROM exercises WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Name substring search, alphabetical. A blank query lists the first names.
pub async fn search(db: &SqlitePool, query: &str) -> Result<Vec<Exercise>, sqlx::Error> {
    let pattern = format!("%{}%", query.trim());
    sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle_group, equipment
        FROM exercises
        WHERE name LIKE ?
        ORDER BY name
        LIMIT ?
        "#,
    )
    .bind(pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(db)
    .await
}
