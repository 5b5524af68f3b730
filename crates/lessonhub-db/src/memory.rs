//! In-memory repositories for tests.
//!
//! A single mutex guards all tables, so each repository call is atomic the
//! way a single SQL statement is. Uniqueness, foreign keys and cascades
//! mirror the PostgreSQL schema in `migrations/`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use lessonhub_models::{
    EnrolledStudent, Lesson, LessonId, LessonWithStats, NewLesson, NewUser, UpdateLessonDto,
    UpdateUserDto, User, UserCredentials, UserId, UserRole,
};

use crate::error::StoreError;
use crate::repository::{LessonRepository, UserRepository};

struct StoredUser {
    user: User,
    password: String,
}

struct Enrollment {
    lesson_id: LessonId,
    student_id: UserId,
    seq: u64,
    enrolled_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: Vec<StoredUser>,
    lessons: Vec<Lesson>,
    enrollments: Vec<Enrollment>,
    next_seq: u64,
}

impl Tables {
    fn user(&self, id: UserId) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.user.id == id)
    }

    fn lesson_exists(&self, id: LessonId) -> bool {
        self.lessons.iter().any(|l| l.id == id)
    }

    fn roster(&self, lesson_id: LessonId) -> Vec<&Enrollment> {
        let mut rows: Vec<&Enrollment> = self
            .enrollments
            .iter()
            .filter(|e| e.lesson_id == lesson_id)
            .collect();
        rows.sort_by_key(|e| e.seq);
        rows
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;

        if tables
            .users
            .iter()
            .any(|u| u.user.email == user.email && u.user.role == user.role)
        {
            return Err(StoreError::UniqueViolation);
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(StoredUser {
            user: created.clone(),
            password: user.password_hash,
        });

        Ok(created)
    }

    async fn find_credentials(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .users
            .iter()
            .find(|u| u.user.email == email && u.user.role == role)
            .map(|u| UserCredentials {
                id: u.user.id,
                name: u.user.name.clone(),
                email: u.user.email.clone(),
                role: u.user.role,
                password: u.password.clone(),
                created_at: u.user.created_at,
                updated_at: u.user.updated_at,
            }))
    }

    async fn find_by_id_and_role(
        &self,
        id: UserId,
        role: UserRole,
    ) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .user(id)
            .filter(|u| u.user.role == role)
            .map(|u| u.user.clone()))
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.user.role == role)
            .map(|u| u.user.clone())
            .collect())
    }

    async fn update(
        &self,
        id: UserId,
        role: UserRole,
        changes: &UpdateUserDto,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.lock().await;

        if let Some(email) = &changes.email {
            if tables
                .users
                .iter()
                .any(|u| u.user.id != id && u.user.role == role && &u.user.email == email)
            {
                return Err(StoreError::UniqueViolation);
            }
        }

        let Some(stored) = tables
            .users
            .iter_mut()
            .find(|u| u.user.id == id && u.user.role == role)
        else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            stored.user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            stored.user.email = email.clone();
        }
        stored.user.updated_at = Utc::now();

        Ok(Some(stored.user.clone()))
    }
}

#[async_trait]
impl LessonRepository for InMemoryStore {
    async fn create(&self, lesson: NewLesson) -> Result<Lesson, StoreError> {
        let mut tables = self.tables.lock().await;

        if let Some(teacher_id) = lesson.teacher_id {
            if tables.user(teacher_id).is_none() {
                return Err(StoreError::ForeignKeyViolation);
            }
        }

        let now = Utc::now();
        let created = Lesson {
            id: LessonId::new(),
            title: lesson.title,
            description: lesson.description,
            teacher_id: lesson.teacher_id,
            created_at: now,
            updated_at: now,
        };
        tables.lessons.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.lessons.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<LessonWithStats>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .lessons
            .iter()
            .map(|lesson| LessonWithStats {
                lesson: lesson.clone(),
                student_count: tables.roster(lesson.id).len() as i64,
            })
            .collect())
    }

    async fn update(
        &self,
        id: LessonId,
        changes: &UpdateLessonDto,
    ) -> Result<Option<Lesson>, StoreError> {
        let mut tables = self.tables.lock().await;

        if let Some(teacher_id) = changes.teacher_id {
            if tables.user(teacher_id).is_none() {
                return Err(StoreError::ForeignKeyViolation);
            }
        }

        let Some(lesson) = tables.lessons.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            lesson.title = title.clone();
        }
        if let Some(description) = &changes.description {
            lesson.description = description.clone();
        }
        if let Some(teacher_id) = changes.teacher_id {
            lesson.teacher_id = Some(teacher_id);
        }
        lesson.updated_at = Utc::now();

        Ok(Some(lesson.clone()))
    }

    async fn delete(&self, id: LessonId) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        let before = tables.lessons.len();
        tables.lessons.retain(|l| l.id != id);
        let deleted = tables.lessons.len() != before;

        if deleted {
            tables.enrollments.retain(|e| e.lesson_id != id);
        }

        Ok(deleted)
    }

    async fn assign_teacher(&self, id: LessonId, teacher_id: UserId) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        if tables.user(teacher_id).is_none() {
            return Err(StoreError::ForeignKeyViolation);
        }

        match tables.lessons.iter_mut().find(|l| l.id == id) {
            Some(lesson) => {
                lesson.teacher_id = Some(teacher_id);
                lesson.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_by_teacher(&self, teacher_id: UserId) -> Result<Vec<Lesson>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .lessons
            .iter()
            .filter(|l| l.teacher_id == Some(teacher_id))
            .cloned()
            .collect())
    }

    async fn list_by_student(&self, student_id: UserId) -> Result<Vec<Lesson>, StoreError> {
        let tables = self.tables.lock().await;

        let mut rows: Vec<&Enrollment> = tables
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .collect();
        rows.sort_by_key(|e| e.seq);

        Ok(rows
            .into_iter()
            .filter_map(|e| tables.lessons.iter().find(|l| l.id == e.lesson_id).cloned())
            .collect())
    }

    async fn count_students(&self, id: LessonId) -> Result<i64, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.roster(id).len() as i64)
    }

    async fn insert_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        if !tables.lesson_exists(lesson_id) || tables.user(student_id).is_none() {
            return Err(StoreError::ForeignKeyViolation);
        }
        if tables
            .enrollments
            .iter()
            .any(|e| e.lesson_id == lesson_id && e.student_id == student_id)
        {
            return Ok(false);
        }

        tables.next_seq += 1;
        let seq = tables.next_seq;
        tables.enrollments.push(Enrollment {
            lesson_id,
            student_id,
            seq,
            enrolled_at: Utc::now(),
        });

        Ok(true)
    }

    async fn delete_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        let before = tables.enrollments.len();
        tables
            .enrollments
            .retain(|e| !(e.lesson_id == lesson_id && e.student_id == student_id));

        Ok(tables.enrollments.len() != before)
    }

    async fn list_students(
        &self,
        lesson_id: LessonId,
    ) -> Result<Vec<EnrolledStudent>, StoreError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .roster(lesson_id)
            .into_iter()
            .filter_map(|e| {
                tables.user(e.student_id).map(|u| EnrolledStudent {
                    id: u.user.id,
                    name: u.user.name.clone(),
                    email: u.user.email.clone(),
                    enrolled_at: e.enrolled_at,
                })
            })
            .collect())
    }
}
