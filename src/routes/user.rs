use crate::{
    AppState,
    auth::Caller,
    dto::{AuthResponse, LoginRequest, SignupRequest, UserResponse},
    errors::ApiError,
    models::User,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use bcrypt::{hash, verify};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// POST /api/auth/signup
/// Body: { "email": "...", "name": "...", "password": "..." }
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::UserAlreadyExists);
    }

    let cost = state.config.bcrypt_cost;
    let password = payload.password;
    let hashed_password = tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ApiError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = state
        .users
        .insert(User {
            id: Uuid::new_v4(),
            email: payload.email,
            name: payload.name,
            hashed_password,
            created_at: Utc::now(),
        })
        .await?;

    let token = state.identity.issue_token(&user)?;

    info!("New user registered: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let hashed = user.hashed_password.clone();
    let valid = tokio::task::spawn_blocking(move || verify(payload.password, &hashed))
        .await
        .map_err(|e| ApiError::InternalError(format!("Verification task failed: {}", e)))?
        .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.identity.issue_token(&user)?;

    info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/users/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(caller.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user.into()))
}
