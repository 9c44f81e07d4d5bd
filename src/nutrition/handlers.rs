use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    clients::Product,
    dates::{self, parse_iso},
    error::AppResult,
    nutrition::{
        dto::{DeletedResponse, LogFoodRequest, TargetRequest},
        repo_types::{DailyTarget, FoodLogEntry},
        services::{self, DailyLedger},
    },
    state::AppState,
};

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/target", post(set_target))
        .route("/nutrition/today", get(today_ledger))
        .route("/nutrition/:day", get(day_ledger))
}

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food/barcode/:barcode", get(barcode_lookup))
        .route("/food/log", post(log_food))
        .route("/food/log/:id", delete(delete_log))
}

#[instrument(skip(state, payload))]
pub async fn set_target(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<TargetRequest>,
) -> AppResult<Json<DailyTarget>> {
    let target = services::set_daily_target(&state.db, user_id, payload.into()).await?;
    Ok(Json(target))
}

#[instrument(skip(state))]
pub async fn today_ledger(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<DailyLedger>> {
    let ledger = services::daily_ledger(&state.db, user_id, dates::today_utc()).await?;
    Ok(Json(ledger))
}

#[instrument(skip(state))]
pub async fn day_ledger(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(day): Path<String>,
) -> AppResult<Json<DailyLedger>> {
    let day = parse_iso("day", &day)?;
    let ledger = services::daily_ledger(&state.db, user_id, day).await?;
    Ok(Json(ledger))
}

#[instrument(skip(state, _user))]
pub async fn barcode_lookup(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(barcode): Path<String>,
) -> AppResult<Json<Product>> {
    let product = services::lookup_barcode(state.products.as_ref(), &barcode).await?;
    Ok(Json(product))
}

#[instrument(skip(state, payload))]
pub async fn log_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogFoodRequest>,
) -> AppResult<(StatusCode, Json<FoodLogEntry>)> {
    let entry =
        services::log_food(&state.db, user_id, payload.into(), dates::today_utc()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<DeletedResponse>> {
    let log_date = services::delete_food_log(&state.db, user_id, id).await?;
    Ok(Json(DeletedResponse {
        deleted: id,
        log_date,
    }))
}
