use sqlx::{Sqlite, SqlitePool, Transaction};
use time::Date;
use uuid::Uuid;

use super::convert::{Per100g, Serving};
use super::repo_types::{DailyTarget, FoodCatalogEntry, FoodLogEntry, MacroTotals};

const FOOD_LOG_COLUMNS: &str = "id, log_date, food_id, food_name, amount_grams, kcal, protein, carbs, fat, created_at";

/// Insert or overwrite the cached food keyed by `(api_source, api_id)`.
pub async fn upsert_food_tx(
    tx: &mut Transaction<'_, Sqlite>,
    api_source: &str,
    api_id: &str,
    name: &str,
    per_100g: &Per100g,
) -> Result<i64, sqlx::Error> {
    let [kcal, protein, carbs, fat] = per_100g.or_zero();
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO foods (api_source, api_id, name, kcal_per_100, protein_per_100, carbs_per_100, fat_per_100)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (api_source, api_id) DO UPDATE SET
            name = excluded.name,
            kcal_per_100 = excluded.kcal_per_100,
            protein_per_100 = excluded.protein_per_100,
            carbs_per_100 = excluded.carbs_per_100,
            fat_per_100 = excluded.fat_per_100
        RETURNING id
        "#,
    )
    .bind(api_source)
    .bind(api_id)
    .bind(name)
    .bind(kcal)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

pub async fn insert_food_log_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: Uuid,
    log_date: Date,
    food_id: Option<i64>,
    food_name: &str,
    amount_grams: f64,
    serving: &Serving,
) -> Result<FoodLogEntry, sqlx::Error> {
    sqlx::query_as::<_, FoodLogEntry>(&format!(
        r#"
        INSERT INTO food_logs (user_id, log_date, food_id, food_name, amount_grams, kcal, protein, carbs, fat)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {FOOD_LOG_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(log_date)
    .bind(food_id)
    .bind(food_name)
    .bind(amount_grams)
    .bind(serving.kcal)
    .bind(serving.protein)
    .bind(serving.carbs)
    .bind(serving.fat)
    .fetch_one(&mut **tx)
    .await
}

pub async fn find_food(
    db: &SqlitePool,
    api_source: &str,
    api_id: &str,
) -> Result<Option<FoodCatalogEntry>, sqlx::Error> {
    sqlx::query_as::<_, FoodCatalogEntry>(
        r#"
        SELECT id, api_source, api_id, name, kcal_per_100, protein_per_100, carbs_per_100, fat_per_100
        FROM foods
        WHERE api_source = ? AND api_id = ?
        "#,
    )
    .bind(api_source)
    .bind(api_id)
    .fetch_optional(db)
    .await
}

/// Entries of one day, newest first.
pub async fn list_food_logs(
    db: &SqlitePool,
    user_id: Uuid,
    day: Date,
) -> Result<Vec<FoodLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, FoodLogEntry>(&format!(
        r#"
        SELECT {FOOD_LOG_COLUMNS}
        FROM food_logs
        WHERE user_id = ? AND log_date = ?
        ORDER BY created_at DESC, id DESC
        "#
    ))
    .bind(user_id)
    .bind(day)
    .fetch_all(db)
    .await
}

pub async fn day_totals(
    db: &SqlitePool,
    user_id: Uuid,
    day: Date,
) -> Result<MacroTotals, sqlx::Error> {
    sqlx::query_as::<_, MacroTotals>(
        r#"
        SELECT
            CAST(COALESCE(SUM(kcal), 0.0) AS REAL) AS kcal,
            CAST(COALESCE(SUM(protein), 0.0) AS REAL) AS protein,
            CAST(COALESCE(SUM(carbs), 0.0) AS REAL) AS carbs,
            CAST(COALESCE(SUM(fat), 0.0) AS REAL) AS fat
        FROM food_logs
        WHERE user_id = ? AND log_date = ?
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_one(db)
    .await
}

pub async fn get_target(db: &SqlitePool, user_id: Uuid) -> Result<Option<DailyTarget>, sqlx::Error> {
    sqlx::query_as::<_, DailyTarget>(
        r#"
        SELECT kcal_target, protein_target, carbs_target, fat_target
        FROM daily_targets
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Replace every field of the user's target row.
pub async fn upsert_target(
    db: &SqlitePool,
    user_id: Uuid,
    target: &DailyTarget,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_targets (user_id, kcal_target, protein_target, carbs_target, fat_target)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            kcal_target = excluded.kcal_target,
            protein_target = excluded.protein_target,
            carbs_target = excluded.carbs_target,
            fat_target = excluded.fat_target,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(user_id)
    .bind(target.kcal_target)
    .bind(target.protein_target)
    .bind(target.carbs_target)
    .bind(target.fat_target)
    .execute(db)
    .await?;
    Ok(())
}

/// Set only the kcal target, keeping any macro targets already stored.
pub async fn upsert_kcal_target(
    db: &SqlitePool,
    user_id: Uuid,
    kcal_target: f64,
) -> Result<DailyTarget, sqlx::Error> {
    sqlx::query_as::<_, DailyTarget>(
        r#"
        INSERT INTO daily_targets (user_id, kcal_target)
        VALUES (?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            kcal_target = excluded.kcal_target,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        RETURNING kcal_target, protein_target, carbs_target, fat_target
        "#,
    )
    .bind(user_id)
    .bind(kcal_target)
    .fetch_one(db)
    .await
}

/// Delete one of the user's entries, returning its date.
pub async fn delete_food_log(
    db: &SqlitePool,
    user_id: Uuid,
    log_id: i64,
) -> Result<Option<Date>, sqlx::Error> {
    let row: Option<(Date,)> = sqlx::query_as(
        r#"
        DELETE FROM food_logs
        WHERE id = ? AND user_id = ?
        RETURNING log_date
        "#,
    )
    .bind(log_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(d,)| d))
}
