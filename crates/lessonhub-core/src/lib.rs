//! # LessonHub Core
//!
//! Foundational types shared by every LessonHub crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP rendering
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use lessonhub_core::errors::AppError;
//! use lessonhub_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Lesson not found"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash));
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
