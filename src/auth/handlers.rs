use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, PublicUser, RefreshRequest, Session},
        repo_types::User,
        services::{check_password_strength, hash_password, parse_email, verify_password, AuthUser},
        tokens::{TokenKeys, TokenKind},
    },
    error::{is_unique_violation, AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn start_session(state: &AppState, user: User) -> AppResult<Session> {
    let tokens = TokenKeys::from_ref(state).pair(user.id)?;
    Ok(Session {
        tokens,
        user: user.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> AppResult<(StatusCode, Json<Session>)> {
    let email = parse_email(&payload.email)?;
    check_password_strength(&payload.password)?;

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &email, &hash).await.map_err(|e| {
        if is_unique_violation(&e) {
            warn!(%email, "email already registered");
            AppError::Conflict("Email already registered".into())
        } else {
            AppError::Database(e)
        }
    })?;

    info!(user_id = %user.id, %email, "user registered");
    Ok((StatusCode::CREATED, Json(start_session(&state, user)?)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> AppResult<Json<Session>> {
    let email = payload.email.trim().to_lowercase();
    let rejected = || AppError::Unauthorized("Invalid email or password".into());

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login for unknown email");
        return Err(rejected());
    };
    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(rejected());
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(start_session(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<Session>> {
    let claims = TokenKeys::from_ref(&state)
        .decode(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|e| {
            warn!(error = %e, "rejected refresh token");
            AppError::Unauthorized("Invalid or expired refresh token".into())
        })?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;

    Ok(Json(start_session(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;
    Ok(Json(user.into()))
}
