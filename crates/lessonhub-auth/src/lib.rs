//! # LessonHub Auth
//!
//! Stateless bearer tokens: HS256-signed JWTs carrying the caller's id,
//! role and display name.
//!
//! - [`claims`]: the token payload
//! - [`jwt`]: [`TokenService`] for issuing and validating tokens
//!
//! ```ignore
//! use lessonhub_auth::TokenService;
//! use lessonhub_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let issued = tokens.issue(user_id, UserRole::Teacher, "Grace")?;
//! let claims = tokens.validate(&issued.token)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{IssuedToken, TokenError, TokenService};
