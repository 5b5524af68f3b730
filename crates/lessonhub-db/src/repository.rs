//! Storage ports.
//!
//! Services only see these traits. [`crate::postgres`] provides the
//! production implementation; the in-memory store behind the `test-utils`
//! feature implements the same contracts for tests.

use async_trait::async_trait;

use lessonhub_models::{
    EnrolledStudent, Lesson, LessonId, LessonWithStats, NewLesson, NewUser, UpdateLessonDto,
    UpdateUserDto, User, UserCredentials, UserId, UserRole,
};

use crate::error::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new identity.
    ///
    /// # Errors
    /// * `UniqueViolation` - the email is already registered for this role
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Look up login credentials within a role's namespace.
    async fn find_credentials(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserCredentials>, StoreError>;

    /// Look up an identity only if it carries `role`.
    async fn find_by_id_and_role(
        &self,
        id: UserId,
        role: UserRole,
    ) -> Result<Option<User>, StoreError>;

    /// All identities with `role`, oldest first.
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError>;

    /// Apply a partial profile update to an identity with `role`.
    ///
    /// Returns `None` if no such identity exists.
    ///
    /// # Errors
    /// * `UniqueViolation` - the new email is taken within the role
    async fn update(
        &self,
        id: UserId,
        role: UserRole,
        changes: &UpdateUserDto,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait LessonRepository: Send + Sync + 'static {
    /// # Errors
    /// * `ForeignKeyViolation` - `teacher_id` references no identity
    async fn create(&self, lesson: NewLesson) -> Result<Lesson, StoreError>;

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, StoreError>;

    /// All lessons with their roster size, oldest first.
    async fn list(&self) -> Result<Vec<LessonWithStats>, StoreError>;

    /// Apply a partial update. Returns `None` if the lesson does not exist.
    async fn update(
        &self,
        id: LessonId,
        changes: &UpdateLessonDto,
    ) -> Result<Option<Lesson>, StoreError>;

    /// Delete a lesson and, with it, its enrollments.
    ///
    /// Returns `false` if the lesson did not exist.
    async fn delete(&self, id: LessonId) -> Result<bool, StoreError>;

    /// Overwrite the lesson's teacher. Returns `false` if the lesson does not
    /// exist.
    async fn assign_teacher(&self, id: LessonId, teacher_id: UserId) -> Result<bool, StoreError>;

    async fn list_by_teacher(&self, teacher_id: UserId) -> Result<Vec<Lesson>, StoreError>;

    /// Lessons the student is enrolled in, in enrollment order.
    async fn list_by_student(&self, student_id: UserId) -> Result<Vec<Lesson>, StoreError>;

    async fn count_students(&self, id: LessonId) -> Result<i64, StoreError>;

    /// Insert the `(lesson, student)` pair atomically.
    ///
    /// Returns `false` when the pair already exists.
    ///
    /// # Errors
    /// * `ForeignKeyViolation` - the lesson or student row is gone
    async fn insert_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError>;

    /// Returns `false` when the pair was not enrolled.
    async fn delete_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError>;

    /// Roster of the lesson, in enrollment order.
    async fn list_students(&self, lesson_id: LessonId)
    -> Result<Vec<EnrolledStudent>, StoreError>;
}
