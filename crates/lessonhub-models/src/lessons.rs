//! Lesson and enrollment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{LessonId, UserId};

/// A lesson. `teacher_id` is `None` until a teacher is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub teacher_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LessonWithStats {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub lesson: Lesson,
    pub student_count: i64,
}

/// A roster entry. Rosters are returned in enrollment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnrolledStudent {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Lesson ready to be inserted, after validation.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub description: String,
    pub teacher_id: Option<UserId>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateLessonDto {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub teacher_id: Option<UserId>,
}

/// Partial lesson update. A provided title or description must not be empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    pub teacher_id: Option<UserId>,
}

impl UpdateLessonDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.teacher_id.is_none()
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AssignTeacherDto {
    pub teacher_id: UserId,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct EnrollStudentDto {
    pub student_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lesson_requires_title() {
        let dto = CreateLessonDto {
            title: String::new(),
            description: None,
            teacher_id: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_lesson_rejects_empty_description() {
        let dto = UpdateLessonDto {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
        assert!(!dto.is_empty());
        assert!(UpdateLessonDto::default().is_empty());
    }

    #[test]
    fn test_lesson_with_stats_flattens() {
        let now = Utc::now();
        let stats = LessonWithStats {
            lesson: Lesson {
                id: LessonId::new(),
                title: "Algebra".to_string(),
                description: String::new(),
                teacher_id: None,
                created_at: now,
                updated_at: now,
            },
            student_count: 3,
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["title"], "Algebra");
        assert_eq!(value["student_count"], 3);
        assert!(value["teacher_id"].is_null());
    }
}
