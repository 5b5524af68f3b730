//! Helpers behind the `lessonhub-cli` binary.

use lessonhub_core::AppError;
use lessonhub_db::Database;
use lessonhub_models::{RegisterRequest, User, UserRole};
use validator::Validate;

use crate::modules::auth::service::AuthService;

/// Creates an account with the same rules as `POST /api/auth/register/{role}`.
pub async fn create_user(
    db: &Database,
    role: UserRole,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    request.validate()?;

    AuthService::register(db, role, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_user_validates_input() {
        let db = Database::in_memory();

        let err = create_user(&db, UserRole::Admin, "Root", "not-an-email", "password123")
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let user = create_user(&db, UserRole::Admin, "Root", "root@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }
}
