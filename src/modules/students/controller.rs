use axum::{
    Json,
    extract::{Path, State},
};
use lessonhub_core::{AppError, ErrorResponse};
use lessonhub_models::UserId;
use tracing::instrument;

use super::model::{UpdateUserDto, User};
use super::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = UserId, Path, description = "Student ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Student updated", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}
