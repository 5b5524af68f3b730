use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lessonhub_models::{
    EnrolledStudent, Lesson, LessonId, LessonWithStats, NewLesson, NewUser, UpdateLessonDto,
    UpdateUserDto, User, UserCredentials, UserId, UserRole,
};

use crate::error::StoreError;
use crate::repository::{LessonRepository, UserRepository};

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";
const LESSON_COLUMNS: &str = "id, title, description, teacher_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn find_credentials(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserCredentials>, StoreError> {
        sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, name, email, role, password, created_at, updated_at
            FROM users
            WHERE email = $1 AND role = $2
            "#,
        )
        .bind(email)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_role(
        &self,
        id: UserId,
        role: UserRole,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND role = $2"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at, id"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: UserId,
        role: UserRole,
        changes: &UpdateUserDto,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($3, name),
                email = COALESCE($4, email),
                updated_at = NOW()
            WHERE id = $1 AND role = $2
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(role)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }
}

#[derive(Debug, Clone)]
pub struct PgLessonRepository {
    pool: PgPool,
}

impl PgLessonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for PgLessonRepository {
    #[instrument(skip(self, lesson), fields(title = %lesson.title))]
    async fn create(&self, lesson: NewLesson) -> Result<Lesson, StoreError> {
        sqlx::query_as::<_, Lesson>(&format!(
            r#"
            INSERT INTO lessons (title, description, teacher_id)
            VALUES ($1, $2, $3)
            RETURNING {LESSON_COLUMNS}
            "#
        ))
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(lesson.teacher_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, StoreError> {
        sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<LessonWithStats>, StoreError> {
        sqlx::query_as::<_, LessonWithStats>(
            r#"
            SELECT l.id, l.title, l.description, l.teacher_id, l.created_at, l.updated_at,
                   COUNT(ls.student_id) AS student_count
            FROM lessons l
            LEFT JOIN lesson_students ls ON ls.lesson_id = l.id
            GROUP BY l.id
            ORDER BY l.created_at, l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: LessonId,
        changes: &UpdateLessonDto,
    ) -> Result<Option<Lesson>, StoreError> {
        sqlx::query_as::<_, Lesson>(&format!(
            r#"
            UPDATE lessons
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                teacher_id = COALESCE($4, teacher_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {LESSON_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.teacher_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: LessonId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn assign_teacher(&self, id: LessonId, teacher_id: UserId) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE lessons SET teacher_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(teacher_id)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_by_teacher(&self, teacher_id: UserId) -> Result<Vec<Lesson>, StoreError> {
        sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE teacher_id = $1 ORDER BY created_at, id"
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn list_by_student(&self, student_id: UserId) -> Result<Vec<Lesson>, StoreError> {
        sqlx::query_as::<_, Lesson>(
            r#"
            SELECT l.id, l.title, l.description, l.teacher_id, l.created_at, l.updated_at
            FROM lessons l
            JOIN lesson_students ls ON ls.lesson_id = l.id
            WHERE ls.student_id = $1
            ORDER BY ls.seq
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn count_students(&self, id: LessonId) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lesson_students WHERE lesson_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn insert_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        // The primary key makes the existence check and the insert one
        // atomic step.
        let result = sqlx::query(
            r#"
            INSERT INTO lesson_students (lesson_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (lesson_id, student_id) DO NOTHING
            "#,
        )
        .bind(lesson_id)
        .bind(student_id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete_enrollment(
        &self,
        lesson_id: LessonId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM lesson_students WHERE lesson_id = $1 AND student_id = $2")
                .bind(lesson_id)
                .bind(student_id)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_students(
        &self,
        lesson_id: LessonId,
    ) -> Result<Vec<EnrolledStudent>, StoreError> {
        sqlx::query_as::<_, EnrolledStudent>(
            r#"
            SELECT u.id, u.name, u.email, ls.enrolled_at
            FROM lesson_students ls
            JOIN users u ON u.id = ls.student_id
            WHERE ls.lesson_id = $1
            ORDER BY ls.seq
            "#,
        )
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }
}
