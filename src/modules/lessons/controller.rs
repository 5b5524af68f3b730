use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lessonhub_core::{AppError, ErrorResponse};
use lessonhub_models::LessonId;
use tracing::instrument;

use super::model::{CreateLessonDto, Lesson, LessonWithStats, UpdateLessonDto};
use super::service::LessonService;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    responses(
        (status = 200, description = "All lessons, oldest first", body = Vec<LessonWithStats>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn list_lessons(
    State(state): State<AppState>,
) -> Result<Json<Vec<LessonWithStats>>, AppError> {
    let lessons = LessonService::list_lessons(&state.db).await?;
    Ok(Json(lessons))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson details", body = LessonWithStats),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<LessonId>,
) -> Result<Json<LessonWithStats>, AppError> {
    let lesson = LessonService::get_lesson(&state.db, id).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Lesson or teacher not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<LessonId>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    responses(
        (status = 204, description = "Lesson and its enrollments deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<LessonId>,
) -> Result<StatusCode, AppError> {
    LessonService::delete_lesson(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lessons taught by the calling teacher
#[utoipa::path(
    get,
    path = "/api/teacher/lessons",
    responses(
        (status = 200, description = "Lessons assigned to the caller", body = Vec<Lesson>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_teacher_lessons(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::teacher_lessons(&state.db, user.user_id).await?;
    Ok(Json(lessons))
}

/// Lessons the calling student is enrolled in
#[utoipa::path(
    get,
    path = "/api/student/lessons",
    responses(
        (status = 200, description = "Lessons the caller is enrolled in", body = Vec<Lesson>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_student_lessons(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::student_lessons(&state.db, user.user_id).await?;
    Ok(Json(lessons))
}
