use crate::state::AppState;
use axum::Router;

pub mod convert;
mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::nutrition_routes())
        .merge(handlers::food_routes())
}
