use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use lessonhub_auth::Claims;
use lessonhub_core::AppError;
use lessonhub_models::{UserId, UserRole};
use tracing::debug;

use crate::state::AppState;

/// The authenticated caller, attached to the request by [`authenticate`].
///
/// Use it as an extractor in handlers behind the authentication layer. It
/// rejects with 401 when the layer did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub role: UserRole,
    pub name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
            name: claims.name,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The header must have exactly two space separated parts, the first being
/// `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized(
            "Invalid authorization header format".to_string(),
        )),
    }
}

/// Authentication layer.
///
/// Validates the bearer token and stores the caller as a [`CurrentUser`]
/// request extension. Any token failure yields the same 401 body.
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/me", get(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
/// ```
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = state.tokens.validate(token).map_err(|err| {
        debug!(reason = %err, "Rejected bearer token");
        AppError::from(err)
    })?;

    req.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_accepts_exact_form() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_rejects_other_forms() {
        for value in [
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer abc extra",
            "Bearer  abc",
            "abc",
        ] {
            let err = bearer_token(&headers(value)).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED, "{value:?}");
        }
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_current_user_from_claims() {
        let user_id = UserId::new();
        let user = CurrentUser::from(Claims {
            user_id,
            role: UserRole::Teacher,
            name: "Grace".to_string(),
            iat: 0,
            nbf: 0,
            exp: 1,
        });

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.name, "Grace");
    }
}
