use sqlx::SqlitePool;
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::convert::{round2, Per100g};
use super::repo;
use super::repo_types::{DailyTarget, FoodLogEntry, MacroTotals};
use crate::clients::{Product, ProductSource};
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_SOURCE: &str = "openfoodfacts";
pub const MIN_DAILY_KCAL: f64 = 500.0;
pub const MAX_DAILY_KCAL: f64 = 10_000.0;

#[derive(Debug, Clone, Default)]
pub struct LogFoodInput {
    pub name: String,
    pub grams: f64,
    pub per_100g: Per100g,
    pub api_source: Option<String>,
    pub api_id: Option<String>,
    pub log_date: Option<Date>,
}

/// Record a serving of food, caching the external product when it has an id.
///
/// The catalog upsert and the log insert commit together. Snapshot values are
/// computed from the submitted per-100 g values, not re-read from the catalog.
pub async fn log_food(
    db: &SqlitePool,
    user_id: Uuid,
    input: LogFoodInput,
    today: Date,
) -> AppResult<FoodLogEntry> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "Product name is missing"));
    }
    if !(input.grams.is_finite() && input.grams > 0.0) {
        return Err(AppError::validation(
            "grams",
            "Amount must be a number of grams greater than 0",
        ));
    }

    let log_date = input.log_date.unwrap_or(today);
    let serving = input.per_100g.serving(input.grams);
    let external = input
        .api_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            let source = input
                .api_source
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_API_SOURCE);
            (source, id)
        });

    let mut tx = db.begin().await?;
    let food_id = match external {
        Some((source, id)) => {
            Some(repo::upsert_food_tx(&mut tx, source, id, name, &input.per_100g).await?)
        }
        None => None,
    };
    let entry = repo::insert_food_log_tx(
        &mut tx,
        user_id,
        log_date,
        food_id,
        name,
        input.grams,
        &serving,
    )
    .await?;
    tx.commit().await?;

    info!(%user_id, log_id = entry.id, kcal = entry.kcal, "food logged");
    Ok(entry)
}

pub async fn delete_food_log(db: &SqlitePool, user_id: Uuid, log_id: i64) -> AppResult<Date> {
    match repo::delete_food_log(db, user_id, log_id).await? {
        Some(day) => {
            info!(%user_id, log_id, "food log deleted");
            Ok(day)
        }
        None => Err(AppError::NotFound("Log entry not found".into())),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetInput {
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

fn validate_target(input: &TargetInput) -> AppResult<DailyTarget> {
    let kcal = input
        .kcal
        .ok_or_else(|| AppError::validation("kcal_target", "Enter a kcal target"))?;
    if !(MIN_DAILY_KCAL..=MAX_DAILY_KCAL).contains(&kcal) {
        return Err(AppError::validation(
            "kcal_target",
            "Choose a realistic kcal target (between 500 and 10000)",
        ));
    }
    for (field, value) in [
        ("protein_target", input.protein),
        ("carbs_target", input.carbs),
        ("fat_target", input.fat),
    ] {
        if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
            return Err(AppError::validation(field, "Macro targets cannot be negative"));
        }
    }
    Ok(DailyTarget {
        kcal_target: kcal,
        protein_target: input.protein,
        carbs_target: input.carbs,
        fat_target: input.fat,
    })
}

/// Replace the user's daily target. Fields left out are cleared, not kept.
pub async fn set_daily_target(
    db: &SqlitePool,
    user_id: Uuid,
    input: TargetInput,
) -> AppResult<DailyTarget> {
    let target = validate_target(&input)?;
    repo::upsert_target(db, user_id, &target).await?;
    info!(%user_id, kcal = target.kcal_target, "daily target saved");
    Ok(target)
}

/// Remaining energy for a day. Without a target the target counts as 0.
pub fn remaining_from(target_kcal: Option<f64>, consumed_kcal: f64) -> f64 {
    round2(target_kcal.unwrap_or(0.0) - consumed_kcal)
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Remaining {
    /// `None` means no target has been set, whatever `remaining_kcal` says.
    pub target_kcal: Option<f64>,
    pub consumed_kcal: f64,
    pub remaining_kcal: f64,
}

pub async fn remaining_kcal(db: &SqlitePool, user_id: Uuid, day: Date) -> AppResult<Remaining> {
    let totals = repo::day_totals(db, user_id, day).await?;
    let target = repo::get_target(db, user_id).await?;
    let target_kcal = target.map(|t| t.kcal_target);
    Ok(Remaining {
        target_kcal,
        consumed_kcal: round2(totals.kcal),
        remaining_kcal: remaining_from(target_kcal, totals.kcal),
    })
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DailyLedger {
    #[serde(with = "crate::dates::iso_date")]
    pub day: Date,
    pub entries: Vec<FoodLogEntry>,
    pub totals: MacroTotals,
    pub target: Option<DailyTarget>,
    pub remaining_kcal: f64,
}

pub async fn daily_ledger(db: &SqlitePool, user_id: Uuid, day: Date) -> AppResult<DailyLedger> {
    let entries = repo::list_food_logs(db, user_id, day).await?;
    let totals = repo::day_totals(db, user_id, day).await?;
    let target = repo::get_target(db, user_id).await?;
    Ok(DailyLedger {
        day,
        entries,
        totals: MacroTotals {
            kcal: round2(totals.kcal),
            protein: round2(totals.protein),
            carbs: round2(totals.carbs),
            fat: round2(totals.fat),
        },
        remaining_kcal: remaining_from(target.map(|t| t.kcal_target), totals.kcal),
        target,
    })
}

/// Product by barcode. Source failures are reported as "not found".
pub async fn lookup_barcode(source: &dyn ProductSource, barcode: &str) -> AppResult<Product> {
    let barcode = barcode.trim();
    if barcode.is_empty() || !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "barcode",
            "Barcode may only contain digits",
        ));
    }
    match source.lookup(barcode).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(AppError::NotFound("Product not found".into())),
        Err(e) => {
            warn!(error = %e, barcode, "product lookup failed");
            Err(AppError::NotFound(
                "Product not found (or the product database is unreachable)".into(),
            ))
        }
    }
}
