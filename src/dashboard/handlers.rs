use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    dashboard::services::{self, Dashboard},
    dates,
    error::AppResult,
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Dashboard>> {
    let dash = services::dashboard(
        &state.db,
        state.recipes.as_ref(),
        user_id,
        dates::today_utc(),
    )
    .await?;
    Ok(Json(dash))
}
