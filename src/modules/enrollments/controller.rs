use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lessonhub_core::{AppError, ErrorResponse};
use lessonhub_models::{Lesson, LessonId, UserId, UserRole};
use serde_json::json;
use tracing::instrument;

use super::model::{AssignTeacherDto, EnrollStudentDto, EnrolledStudent};
use super::service::EnrollmentService;
use crate::middleware::auth::CurrentUser;
use crate::middleware::role::check_role;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/lessons/{id}/assign-teacher",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    request_body = AssignTeacherDto,
    responses(
        (status = 200, description = "Teacher assigned", body = Lesson),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Lesson or teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn assign_teacher(
    State(state): State<AppState>,
    Path(id): Path<LessonId>,
    ValidatedJson(dto): ValidatedJson<AssignTeacherDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = EnrollmentService::assign_teacher(&state.db, id, dto.teacher_id).await?;
    Ok(Json(lesson))
}

/// Admin enrollment, available for any lesson.
#[utoipa::path(
    post,
    path = "/api/lessons/{id}/enroll-student",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student enrolled"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Lesson or student not found", body = ErrorResponse),
        (status = 409, description = "Student already enrolled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(id): Path<LessonId>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    EnrollmentService::enroll_student(&state.db, id, dto.student_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Student enrolled successfully"})),
    ))
}

/// Roster enrollment by an admin or the lesson's own teacher.
#[utoipa::path(
    post,
    path = "/api/lessons/{id}/students",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student enrolled"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the lesson's teacher", body = ErrorResponse),
        (status = 404, description = "Lesson or student not found", body = ErrorResponse),
        (status = 409, description = "Student already enrolled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn add_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<LessonId>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    EnrollmentService::ensure_can_manage(&state.db, id, &user).await?;
    EnrollmentService::enroll_student(&state.db, id, dto.student_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Student enrolled successfully"})),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}/students/{student_id}",
    params(
        ("id" = LessonId, Path, description = "Lesson ID"),
        ("student_id" = UserId, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student removed (or was not enrolled)"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the lesson's teacher", body = ErrorResponse),
        (status = 404, description = "Lesson or student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn remove_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((id, student_id)): Path<(LessonId, UserId)>,
) -> Result<Json<serde_json::Value>, AppError> {
    EnrollmentService::ensure_can_manage(&state.db, id, &user).await?;
    EnrollmentService::remove_student(&state.db, id, student_id).await?;
    Ok(Json(json!({"message": "Student removed successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}/students",
    params(("id" = LessonId, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Roster in enrollment order", body = Vec<EnrolledStudent>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the lesson's teacher", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<LessonId>,
) -> Result<Json<Vec<EnrolledStudent>>, AppError> {
    check_role(&user, UserRole::Teacher)?;

    let students = EnrollmentService::list_students(&state.db, id, user.user_id).await?;
    Ok(Json(students))
}
