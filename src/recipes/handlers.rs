use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::AppResult,
    recipes::services::{self, RecipeDetail, RecipeList},
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(recipe_detail))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub f: String,
}

#[instrument(skip(state, _user))]
pub async fn list_recipes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RecipeQuery>,
) -> Json<RecipeList> {
    Json(services::search(state.recipes.as_ref(), &query.q, &query.f).await)
}

#[instrument(skip(state, _user))]
pub async fn recipe_detail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<RecipeDetail>> {
    Ok(Json(services::detail(state.recipes.as_ref(), &id).await?))
}
