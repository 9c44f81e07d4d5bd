use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use time::Date;
use tracing::{info, instrument, warn};

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    nutrition::convert::deserialize_lenient,
    state::AppState,
    weight::{repo, repo_types::WeightEntry},
};

pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/weight", get(list_weights).post(add_weight))
}

#[derive(Debug, Deserialize)]
pub struct AddWeightRequest {
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub log_date: Option<Date>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub weight: Option<f64>,
}

#[instrument(skip(state))]
pub async fn list_weights(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<WeightEntry>>> {
    Ok(Json(repo::list(&state.db, user_id, None).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddWeightRequest>,
) -> AppResult<(StatusCode, Json<WeightEntry>)> {
    let Some(log_date) = payload.log_date else {
        return Err(AppError::validation("log_date", "Enter a date"));
    };
    let weight = match payload.weight {
        Some(w) if w > 0.0 => w,
        _ => {
            warn!(%user_id, "rejected weight entry");
            return Err(AppError::validation(
                "weight",
                "Weight must be a number greater than 0 (e.g. 82.4)",
            ));
        }
    };

    let entry = repo::insert(&state.db, user_id, log_date, weight).await?;
    info!(%user_id, weight, "weight logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_user, test_state};
    use serde_json::json;

    fn body(value: serde_json::Value) -> Json<AddWeightRequest> {
        Json(serde_json::from_value(value).unwrap())
    }

    #[tokio::test]
    async fn adds_and_lists_weights() {
        let state = test_state().await;
        let user = create_user(&state.db, "a@example.com").await;

        let (status, Json(entry)) = add_weight(
            State(state.clone()),
            AuthUser(user),
            body(json!({ "log_date": "2024-02-01", "weight": "82.4" })),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entry.weight, 82.4);

        let Json(all) = list_weights(State(state), AuthUser(user)).await.unwrap();
        assert_eq!(all, vec![entry]);
    }

    #[tokio::test]
    async fn rejects_missing_date_and_bad_weight() {
        let state = test_state().await;
        let user = create_user(&state.db, "a@example.com").await;

        let err = add_weight(
            State(state.clone()),
            AuthUser(user),
            body(json!({ "weight": 80 })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.field(), Some("log_date"));

        for weight in [json!("heavy"), json!(0), json!(-3.5), json!(null)] {
            let err = add_weight(
                State(state.clone()),
                AuthUser(user),
                body(json!({ "log_date": "2024-02-01", "weight": weight })),
            )
            .await
            .unwrap_err();
            assert_eq!(err.field(), Some("weight"));
        }

        assert!(repo::list(&state.db, user, None).await.unwrap().is_empty());
    }
}
