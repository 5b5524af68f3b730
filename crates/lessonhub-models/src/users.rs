//! Identity models.
//!
//! Admins, teachers and students share one `users` table and are told apart
//! by [`UserRole`]. An email is unique within a role, so the same address may
//! exist once per role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Teacher, UserRole::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "teacher" => Ok(UserRole::Teacher),
            "student" => Ok(UserRole::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Public view of an identity. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row used for login: the identity plus its bcrypt hash.
#[derive(Clone, FromRow)]
pub struct UserCredentials {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Identity ready to be inserted. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile update. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_lowercase_names() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!("student".parse::<UserRole>(), Ok(UserRole::Student));
        assert!("Admin".parse::<UserRole>().is_err());
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::Teacher).unwrap(),
            "\"teacher\""
        );
        let role: UserRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_update_dto_skips_absent_fields() {
        assert!(UpdateUserDto::default().validate().is_ok());

        let bad_email = UpdateUserDto {
            name: None,
            email: Some("nope".to_string()),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_hash() {
        let creds = UserCredentials {
            id: UserId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Admin,
            password: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
