use sqlx::SqlitePool;
use time::Date;
use uuid::Uuid;

use super::repo_types::WeightEntry;

pub async fn insert(
    db: &SqlitePool,
    user_id: Uuid,
    log_date: Date,
    weight: f64,
) -> Result<WeightEntry, sqlx::Error> {
    sqlx::query_as::<_, WeightEntry>(
        r#"
        INSERT INTO weight_logs (user_id, log_date, weight)
        VALUES (?, ?, ?)
        RETURNING id, log_date, weight
        "#,
    )
    .bind(user_id)
    .bind(log_date)
    .bind(weight)
    .fetch_one(db)
    .await
}

/// Newest first. Entries sharing a date come back in reverse insertion order.
pub async fn list(
    db: &SqlitePool,
    user_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<WeightEntry>, sqlx::Error> {
    sqlx::query_as::<_, WeightEntry>(
        r#"
        SELECT id, log_date, weight
        FROM weight_logs
        WHERE user_id = ?
        ORDER BY log_date DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(db)
    .await
}

pub async fn latest(db: &SqlitePool, user_id: Uuid) -> Result<Option<WeightEntry>, sqlx::Error> {
    Ok(list(db, user_id, Some(1)).await?.into_iter().next())
}
