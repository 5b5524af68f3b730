use anyhow::anyhow;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use lessonhub_core::{AppError, ErrorResponse};
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, RegisterRequest, User, UserRole};
use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new admin, teacher or student
#[utoipa::path(
    post,
    path = "/api/auth/register/{role}",
    params(
        ("role" = String, Path, description = "One of admin, teacher, student")
    ),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Unknown role or malformed body", body = ErrorResponse),
        (status = 409, description = "Email already registered for this role", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    Path(role): Path<String>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| AppError::bad_request(anyhow!("Unknown role: {}", role)))?;

    let user = AuthService::register(&state.db, role, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive a JWT
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.tokens, dto).await?;
    Ok(Json(response))
}
