use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::AppResult,
    exercises::repo as exercise_repo,
    state::AppState,
    workouts::{
        dto::{
            AddExerciseRequest, CreateWorkoutRequest, ExerciseHit, ExerciseSearchQuery,
            ExerciseSearchResponse,
        },
        repo,
        repo_types::{Workout, WorkoutDetail},
        services::{self, RECENT_LIMIT},
    },
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/:id", get(workout_detail))
        .route("/workouts/:id/exercises", post(add_exercise))
        .route("/exercises", get(search_exercises))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<Workout>>> {
    Ok(Json(repo::recent(&state.db, user_id, RECENT_LIMIT).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateWorkoutRequest>,
) -> AppResult<(StatusCode, Json<Workout>)> {
    let workout = services::create_workout(
        &state.db,
        user_id,
        payload.workout_date,
        &payload.workout_type,
        payload.notes.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state))]
pub async fn workout_detail(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<WorkoutDetail>> {
    Ok(Json(services::workout_detail(&state.db, user_id, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<AddExerciseRequest>,
) -> AppResult<(StatusCode, Json<WorkoutDetail>)> {
    let detail = services::add_exercise(&state.db, user_id, id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[instrument(skip(state, _user))]
pub async fn search_exercises(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ExerciseSearchQuery>,
) -> AppResult<Json<ExerciseSearchResponse>> {
    let results = exercise_repo::search(&state.db, &query.q)
        .await?
        .into_iter()
        .map(|e| ExerciseHit {
            id: e.id,
            name: e.name,
        })
        .collect();
    Ok(Json(ExerciseSearchResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_exercise, create_user, test_state};
    use serde_json::json;

    #[tokio::test]
    async fn create_then_add_exercise_and_search() {
        let state = test_state().await;
        let user = create_user(&state.db, "a@example.com").await;
        let row = create_exercise(&state.db, "Barbell Row").await;

        let payload: CreateWorkoutRequest = serde_json::from_value(json!({
            "workout_date": "2024-04-02",
            "workout_type": "Pull",
            "notes": "felt strong"
        }))
        .unwrap();
        let (status, Json(workout)) =
            create_workout(State(state.clone()), AuthUser(user), Json(payload))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let payload: AddExerciseRequest =
            serde_json::from_value(json!({ "exercise_id": row, "sets": "4", "reps": "8" }))
                .unwrap();
        let (_, Json(detail)) = add_exercise(
            State(state.clone()),
            AuthUser(user),
            Path(workout.id),
            Json(payload),
        )
        .await
        .unwrap();
        assert_eq!(detail.items[0].name, "Barbell Row");

        let Json(list) = list_workouts(State(state.clone()), AuthUser(user))
            .await
            .unwrap();
        assert_eq!(list, vec![workout]);

        let Json(found) = search_exercises(
            State(state),
            AuthUser(user),
            Query(ExerciseSearchQuery { q: "row".into() }),
        )
        .await
        .unwrap();
        assert_eq!(found.results.len(), 1);
        assert_eq!(found.results[0].id, row);
    }
}
