use anyhow::anyhow;
use lessonhub_core::AppError;
use lessonhub_db::{Database, StoreError};
use lessonhub_models::{LessonId, UserId, UserRole};
use tracing::{info, instrument};

use super::model::{CreateLessonDto, Lesson, LessonWithStats, NewLesson, UpdateLessonDto};

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, dto), fields(title = %dto.title))]
    pub async fn create_lesson(db: &Database, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        let title = non_blank(&dto.title, "title")?;
        let description = dto
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if let Some(teacher_id) = dto.teacher_id {
            Self::require_teacher(db, teacher_id).await?;
        }

        let lesson = db
            .lessons
            .create(NewLesson {
                title,
                description,
                teacher_id: dto.teacher_id,
            })
            .await
            .map_err(teacher_reference_error)?;

        info!(lesson_id = %lesson.id, "Lesson created");
        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn get_lesson(db: &Database, id: LessonId) -> Result<LessonWithStats, AppError> {
        let lesson = db
            .lessons
            .find_by_id(id)
            .await?
            .ok_or_else(lesson_not_found)?;
        let student_count = db.lessons.count_students(id).await?;

        Ok(LessonWithStats {
            lesson,
            student_count,
        })
    }

    #[instrument(skip(db))]
    pub async fn list_lessons(db: &Database) -> Result<Vec<LessonWithStats>, AppError> {
        Ok(db.lessons.list().await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_lesson(
        db: &Database,
        id: LessonId,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }

        db.lessons
            .find_by_id(id)
            .await?
            .ok_or_else(lesson_not_found)?;

        let changes = UpdateLessonDto {
            title: dto.title.as_deref().map(|t| non_blank(t, "title")).transpose()?,
            description: dto
                .description
                .as_deref()
                .map(|d| non_blank(d, "description"))
                .transpose()?,
            teacher_id: dto.teacher_id,
        };

        if let Some(teacher_id) = changes.teacher_id {
            Self::require_teacher(db, teacher_id).await?;
        }

        let lesson = db
            .lessons
            .update(id, &changes)
            .await
            .map_err(teacher_reference_error)?
            .ok_or_else(lesson_not_found)?;

        info!(lesson_id = %lesson.id, "Lesson updated");
        Ok(lesson)
    }

    /// Deletes the lesson together with its roster.
    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &Database, id: LessonId) -> Result<(), AppError> {
        if !db.lessons.delete(id).await? {
            return Err(lesson_not_found());
        }

        info!(lesson_id = %id, "Lesson deleted");
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn teacher_lessons(db: &Database, teacher_id: UserId) -> Result<Vec<Lesson>, AppError> {
        Ok(db.lessons.list_by_teacher(teacher_id).await?)
    }

    /// Lessons the student is enrolled in, in enrollment order.
    #[instrument(skip(db))]
    pub async fn student_lessons(db: &Database, student_id: UserId) -> Result<Vec<Lesson>, AppError> {
        Ok(db.lessons.list_by_student(student_id).await?)
    }

    async fn require_teacher(db: &Database, teacher_id: UserId) -> Result<(), AppError> {
        db.users
            .find_by_id_and_role(teacher_id, UserRole::Teacher)
            .await?
            .map(|_| ())
            .ok_or_else(teacher_not_found)
    }
}

fn non_blank(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::unprocessable(anyhow!("{} cannot be blank", field)));
    }
    Ok(trimmed.to_string())
}

fn lesson_not_found() -> AppError {
    AppError::not_found(anyhow!("Lesson not found"))
}

fn teacher_not_found() -> AppError {
    AppError::not_found(anyhow!("Teacher not found"))
}

fn teacher_reference_error(err: StoreError) -> AppError {
    match err {
        StoreError::ForeignKeyViolation => teacher_not_found(),
        other => other.into(),
    }
}
