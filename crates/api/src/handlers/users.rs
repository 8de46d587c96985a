//! Handlers for human user registration, login and profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use clawcollab_core::error::CoreError;
use clawcollab_core::naming::{validate_password_strength, validate_username};
use clawcollab_db::models::user::{CreateUser, User, UserResponse};
use clawcollab_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `{success, token, user}` returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: UserResponse,
}

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(AuthResponse {
        success: true,
        token,
        user: UserResponse::from(user),
    })
}

/// POST /api/v1/users/register
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_username(&input.username)?;
    validate_password_strength(&input.password)?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Username is already taken".into()).into());
    }
    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(CoreError::Conflict("Email is already registered".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            display_name: input.display_name,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(issue_token(&state, &user)?)))
}

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        tracing::warn!(username = %input.username, "Failed login attempt");
        return Err(invalid());
    }
    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(issue_token(&state, &user)?))
}

/// GET /api/v1/users/me
pub async fn user_me(RequireUser(user): RequireUser) -> impl IntoResponse {
    Json(UserEnvelope {
        success: true,
        user: UserResponse::from(&user),
    })
}
