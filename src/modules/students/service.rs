use anyhow::anyhow;
use lessonhub_core::AppError;
use lessonhub_db::{Database, StoreError};
use lessonhub_models::UserId;
use tracing::{info, instrument};

use super::model::{UpdateUserDto, User, UserRole};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list_students(db: &Database) -> Result<Vec<User>, AppError> {
        Ok(db.users.list_by_role(UserRole::Student).await?)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &Database, id: UserId) -> Result<User, AppError> {
        db.users
            .find_by_id_and_role(id, UserRole::Student)
            .await?
            .ok_or_else(student_not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &Database,
        id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        if dto.name.is_none() && dto.email.is_none() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }

        let changes = UpdateUserDto {
            name: dto.name.map(|n| n.trim().to_string()),
            email: dto.email.map(|e| e.trim().to_string()),
        };
        if changes.name.as_deref() == Some("") {
            return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
        }

        let student = db
            .users
            .update(id, UserRole::Student, &changes)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => AppError::conflict(anyhow!(
                    "Student with email {} already exists",
                    changes.email.as_deref().unwrap_or_default()
                )),
                other => other.into(),
            })?
            .ok_or_else(student_not_found)?;

        info!(student_id = %student.id, "Student updated");
        Ok(student)
    }
}

fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}
