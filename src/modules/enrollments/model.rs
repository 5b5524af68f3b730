use anyhow::anyhow;
use lessonhub_core::AppError;
use lessonhub_db::StoreError;

pub use lessonhub_models::lessons::{AssignTeacherDto, EnrollStudentDto, EnrolledStudent};

/// Failures of roster and assignment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("Lesson not found")]
    LessonNotFound,
    #[error("Student not found")]
    StudentNotFound,
    #[error("Teacher not found")]
    TeacherNotFound,
    #[error("Student is already enrolled in this lesson")]
    AlreadyEnrolled,
    #[error("You are not the teacher of this lesson")]
    NotOwner,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EnrollmentError> for AppError {
    fn from(err: EnrollmentError) -> Self {
        match err {
            EnrollmentError::LessonNotFound
            | EnrollmentError::StudentNotFound
            | EnrollmentError::TeacherNotFound => AppError::not_found(anyhow!("{}", err)),
            EnrollmentError::AlreadyEnrolled => AppError::conflict(anyhow!("{}", err)),
            EnrollmentError::NotOwner => AppError::forbidden(err.to_string()),
            EnrollmentError::Store(store) => store.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (EnrollmentError::LessonNotFound, StatusCode::NOT_FOUND),
            (EnrollmentError::StudentNotFound, StatusCode::NOT_FOUND),
            (EnrollmentError::TeacherNotFound, StatusCode::NOT_FOUND),
            (EnrollmentError::AlreadyEnrolled, StatusCode::CONFLICT),
            (EnrollmentError::NotOwner, StatusCode::FORBIDDEN),
            (
                EnrollmentError::Store(StoreError::Database(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn test_conflict_message() {
        let err = AppError::from(EnrollmentError::AlreadyEnrolled);
        assert_eq!(
            err.error.to_string(),
            "Student is already enrolled in this lesson"
        );
    }
}
