//! Token issuing and validation.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`JwtConfig`]. A token is valid while `nbf <= now < exp`; there is no
//! leeway and no revocation.
//!
//! ```ignore
//! let tokens = TokenService::new(&jwt_config);
//!
//! let issued = tokens.issue(user.id, user.role, &user.name)?;
//! let claims = tokens.validate(&issued.token)?;
//! assert_eq!(claims.user_id, user.id);
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use lessonhub_config::JwtConfig;
use lessonhub_core::AppError;
use lessonhub_models::{UserId, UserRole};

use crate::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token was not signed with HS256")]
    AlgorithmMismatch,
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => TokenError::AlgorithmMismatch,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(message) => {
                AppError::internal_error(format!("Failed to create token: {}", message))
            }
            _ => AppError::unauthorized("Invalid or expired token".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.claims.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Issues and validates access tokens with keys derived once from the
/// configured secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        // Time-based claims are checked in `validate_at` against an explicit
        // clock with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_expiry,
        }
    }

    pub fn issue(
        &self,
        user_id: UserId,
        role: UserRole,
        name: &str,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, role, name, Utc::now().timestamp())
    }

    pub fn issue_at(
        &self,
        user_id: UserId,
        role: UserRole,
        name: &str,
        now: i64,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            user_id,
            role,
            name: name.to_string(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(self.ttl),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validates `token` as of the Unix time `now`.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if now < claims.nbf {
            return Err(TokenError::NotYetValid);
        }
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new("unit-test-secret"))
    }

    #[test]
    fn test_issue_sets_time_claims() {
        let issued = service()
            .issue_at(UserId::new(), UserRole::Student, "Sam", 1_000)
            .unwrap();

        assert_eq!(issued.claims.iat, 1_000);
        assert_eq!(issued.claims.nbf, 1_000);
        assert_eq!(issued.claims.exp, 1_000 + 86_400);
        assert_eq!(issued.expires_at().timestamp(), 87_400);
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let config = JwtConfig {
            secret: "unit-test-secret".to_string(),
            token_expiry: i64::MAX,
        };
        let issued = TokenService::new(&config)
            .issue_at(UserId::new(), UserRole::Teacher, "Tess", 1_000)
            .unwrap();

        assert_eq!(issued.claims.exp, i64::MAX);
    }

    #[test]
    fn test_validate_before_nbf_fails() {
        let tokens = service();
        let issued = tokens
            .issue_at(UserId::new(), UserRole::Admin, "Ada", 5_000)
            .unwrap();

        assert_eq!(
            tokens.validate_at(&issued.token, 4_999),
            Err(TokenError::NotYetValid)
        );
        assert!(tokens.validate_at(&issued.token, 5_000).is_ok());
    }

    #[test]
    fn test_signing_error_maps_to_internal() {
        let err: AppError = TokenError::Signing("bad key".to_string()).into();
        assert_eq!(err.status.as_u16(), 500);

        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), "Invalid or expired token");
    }
}
