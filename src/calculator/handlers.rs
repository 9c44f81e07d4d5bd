use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    calculator::{
        dto::{AdoptTargetRequest, CalculateRequest},
        services::{self, Calculation, CalculatorView},
    },
    dates,
    error::AppResult,
    nutrition::repo_types::DailyTarget,
    state::AppState,
};

pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/calculator", get(view).post(calculate))
        .route("/calculator/target", post(adopt_target))
}

#[instrument(skip(state))]
pub async fn view(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<CalculatorView>> {
    Ok(Json(services::calculator_view(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn calculate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CalculateRequest>,
) -> AppResult<Json<Calculation>> {
    let calc =
        services::calculate(&state.db, user_id, payload.into(), dates::today_utc()).await?;
    Ok(Json(calc))
}

#[instrument(skip(state, payload))]
pub async fn adopt_target(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AdoptTargetRequest>,
) -> AppResult<Json<DailyTarget>> {
    let target = services::adopt_target(&state.db, user_id, payload.kcal_target).await?;
    Ok(Json(target))
}
