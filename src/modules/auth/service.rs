use std::sync::LazyLock;

use anyhow::anyhow;
use lessonhub_auth::TokenService;
use lessonhub_core::{AppError, hash_password, verify_password};
use lessonhub_db::{Database, StoreError};
use lessonhub_models::NewUser;
use tracing::{info, instrument, warn};

use super::model::{LoginRequest, LoginResponse, RegisterRequest, User, UserRole};

/// Hash checked when no account matches, so a miss costs the same bcrypt
/// work as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("lessonhub-dummy-password").ok());

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register(
        db: &Database,
        role: UserRole,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = db
            .users
            .create(NewUser {
                name: name.to_string(),
                email: dto.email.trim().to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => AppError::conflict(anyhow!(
                    "A {} with email {} already exists",
                    role,
                    dto.email
                )),
                other => other.into(),
            })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks `(email, password, role)` and issues a token.
    ///
    /// Unknown role, unknown email and wrong password are indistinguishable
    /// to the caller.
    #[instrument(skip(db, tokens, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn login(
        db: &Database,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let credentials = match dto.role.parse::<UserRole>() {
            Ok(role) => db.users.find_credentials(&dto.email, role).await?,
            Err(_) => None,
        };

        let Some(credentials) = credentials else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&dto.password, hash);
            }
            warn!("Login failed: unknown account");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &credentials.password) {
            warn!(user_id = %credentials.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let issued = tokens.issue(credentials.id, credentials.role, &credentials.name)?;
        let expires_at = issued.expires_at();

        info!(user_id = %credentials.id, "Login succeeded");

        Ok(LoginResponse {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_at,
            user: credentials.into_user(),
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use lessonhub_config::JwtConfig;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: " Grace ".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    fn login_request(email: &str, password: &str, role: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_whitespace_name() {
        let db = Database::in_memory();
        let mut dto = register_request("blank@example.com");
        dto.name = "   ".to_string();

        let err = AuthService::register(&db, UserRole::Student, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(db.users.list_by_role(UserRole::Student).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let db = Database::in_memory();
        let tokens = TokenService::new(&JwtConfig::new("service-test-secret"));

        let user = AuthService::register(&db, UserRole::Teacher, register_request("g@example.com"))
            .await
            .unwrap();
        assert_eq!(user.name, "Grace");

        let response = AuthService::login(
            &db,
            &tokens,
            login_request("g@example.com", "password123", "teacher"),
        )
        .await
        .unwrap();

        let claims = tokens.validate(&response.access_token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, UserRole::Teacher);
        assert_eq!(claims.name, "Grace");
        assert_eq!(response.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let db = Database::in_memory();
        AuthService::register(&db, UserRole::Student, register_request("s@example.com"))
            .await
            .unwrap();

        let err = AuthService::register(&db, UserRole::Student, register_request("s@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_failures_look_alike() {
        let db = Database::in_memory();
        let tokens = TokenService::new(&JwtConfig::new("service-test-secret"));
        AuthService::register(&db, UserRole::Student, register_request("s@example.com"))
            .await
            .unwrap();

        for request in [
            login_request("s@example.com", "wrong-password", "student"),
            login_request("s@example.com", "password123", "teacher"),
            login_request("s@example.com", "password123", "janitor"),
            login_request("nobody@example.com", "password123", "student"),
        ] {
            let err = AuthService::login(&db, &tokens, request).await.unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.error.to_string(), "Invalid credentials");
        }
    }
}
