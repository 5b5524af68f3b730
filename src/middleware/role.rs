//! Role-based authorization.
//!
//! Two ways to gate on roles:
//! 1. The [`require_role`] layer, parameterised by an [`AllowedRoles`] set
//! 2. [`check_role`] / [`check_any_role`] inside a handler
//!
//! The layer reads the [`CurrentUser`] set by the authentication layer, so
//! it must be added *before* (inside) the authentication layer:
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/", post(create_lesson))
//!     .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use lessonhub_core::AppError;
use lessonhub_models::UserRole;

use crate::middleware::auth::CurrentUser;

/// Set of roles admitted by a [`require_role`] layer.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [UserRole]);

pub const ADMIN_ONLY: AllowedRoles = AllowedRoles(&[UserRole::Admin]);
pub const TEACHER_ONLY: AllowedRoles = AllowedRoles(&[UserRole::Teacher]);
pub const STUDENT_ONLY: AllowedRoles = AllowedRoles(&[UserRole::Student]);
pub const ADMIN_OR_TEACHER: AllowedRoles = AllowedRoles(&[UserRole::Admin, UserRole::Teacher]);

/// Rejects with 401 when no caller is attached and with 403 when the caller's
/// role is not in `allowed`.
pub async fn require_role(
    State(allowed): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))?;

    check_any_role(user, allowed.0)?;

    Ok(next.run(req).await)
}

fn role_list(roles: &[UserRole]) -> String {
    roles
        .iter()
        .map(UserRole::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handler-local check for a single role.
///
/// ```rust,ignore
/// pub async fn handler(user: CurrentUser) -> Result<Json<Response>, AppError> {
///     check_role(&user, UserRole::Admin)?;
///     // ...
/// }
/// ```
pub fn check_role(user: &CurrentUser, required_role: UserRole) -> Result<(), AppError> {
    if user.role != required_role {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}, but user has role: {}",
            required_role, user.role
        )));
    }

    Ok(())
}

pub fn check_any_role(user: &CurrentUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}, but user has role: {}",
            role_list(allowed_roles),
            user.role
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use lessonhub_models::UserId;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            role,
            name: "Test".to_string(),
        }
    }

    #[test]
    fn test_allowed_set_admits_listed_role() {
        assert!(check_any_role(&user(UserRole::Teacher), ADMIN_OR_TEACHER.0).is_ok());
        assert!(check_any_role(&user(UserRole::Admin), ADMIN_ONLY.0).is_ok());
    }

    #[test]
    fn test_allowed_set_forbids_other_roles() {
        let err = check_any_role(&user(UserRole::Student), ADMIN_OR_TEACHER.0).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert!(err.error.to_string().contains("admin, teacher"));
    }

    #[test]
    fn test_role_list_formatting() {
        assert_eq!(role_list(&[UserRole::Student]), "student");
        assert_eq!(role_list(&[]), "");
    }
}
