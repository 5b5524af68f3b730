use lessonhub_db::{Database, StoreError};
use lessonhub_models::{Lesson, LessonId, UserId, UserRole};
use tracing::{info, instrument};

use super::model::{EnrolledStudent, EnrollmentError};
use crate::middleware::auth::CurrentUser;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Makes `teacher_id` the lesson's teacher, replacing any previous one.
    #[instrument(skip(db))]
    pub async fn assign_teacher(
        db: &Database,
        lesson_id: LessonId,
        teacher_id: UserId,
    ) -> Result<Lesson, EnrollmentError> {
        Self::require_lesson(db, lesson_id).await?;

        db.users
            .find_by_id_and_role(teacher_id, UserRole::Teacher)
            .await?
            .ok_or(EnrollmentError::TeacherNotFound)?;

        let assigned = db
            .lessons
            .assign_teacher(lesson_id, teacher_id)
            .await
            .map_err(|e| match e {
                StoreError::ForeignKeyViolation => EnrollmentError::TeacherNotFound,
                other => other.into(),
            })?;
        if !assigned {
            return Err(EnrollmentError::LessonNotFound);
        }

        info!(%lesson_id, %teacher_id, "Teacher assigned");
        Self::require_lesson(db, lesson_id).await
    }

    /// Adds the student to the lesson's roster.
    ///
    /// The store inserts the pair atomically, so of two concurrent calls for
    /// the same pair exactly one succeeds.
    #[instrument(skip(db))]
    pub async fn enroll_student(
        db: &Database,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<(), EnrollmentError> {
        Self::require_lesson(db, lesson_id).await?;
        Self::require_student(db, student_id).await?;

        match db.lessons.insert_enrollment(lesson_id, student_id).await {
            Ok(true) => {
                info!(%lesson_id, %student_id, "Student enrolled");
                Ok(())
            }
            Ok(false) => Err(EnrollmentError::AlreadyEnrolled),
            // Lesson or student deleted between the checks and the insert.
            Err(StoreError::ForeignKeyViolation) => {
                Self::require_lesson(db, lesson_id).await?;
                Err(EnrollmentError::StudentNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the student from the roster. Removing a student who is not
    /// enrolled succeeds.
    #[instrument(skip(db))]
    pub async fn remove_student(
        db: &Database,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<(), EnrollmentError> {
        Self::require_lesson(db, lesson_id).await?;
        Self::require_student(db, student_id).await?;

        if db.lessons.delete_enrollment(lesson_id, student_id).await? {
            info!(%lesson_id, %student_id, "Student removed");
        }

        Ok(())
    }

    /// Roster of a lesson, visible only to the lesson's own teacher.
    #[instrument(skip(db))]
    pub async fn list_students(
        db: &Database,
        lesson_id: LessonId,
        teacher_id: UserId,
    ) -> Result<Vec<EnrolledStudent>, EnrollmentError> {
        let lesson = Self::require_lesson(db, lesson_id).await?;

        if lesson.teacher_id != Some(teacher_id) {
            return Err(EnrollmentError::NotOwner);
        }

        Ok(db.lessons.list_students(lesson_id).await?)
    }

    /// Admins may change any roster; teachers only their own lessons'.
    pub async fn ensure_can_manage(
        db: &Database,
        lesson_id: LessonId,
        caller: &CurrentUser,
    ) -> Result<(), EnrollmentError> {
        let lesson = Self::require_lesson(db, lesson_id).await?;

        match caller.role {
            UserRole::Admin => Ok(()),
            UserRole::Teacher if lesson.teacher_id == Some(caller.user_id) => Ok(()),
            _ => Err(EnrollmentError::NotOwner),
        }
    }

    async fn require_lesson(db: &Database, lesson_id: LessonId) -> Result<Lesson, EnrollmentError> {
        db.lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or(EnrollmentError::LessonNotFound)
    }

    async fn require_student(db: &Database, student_id: UserId) -> Result<(), EnrollmentError> {
        db.users
            .find_by_id_and_role(student_id, UserRole::Student)
            .await?
            .map(|_| ())
            .ok_or(EnrollmentError::StudentNotFound)
    }
}
