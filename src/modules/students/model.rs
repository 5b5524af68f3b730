//! Student views, re-exported from `lessonhub-models`.
//!
//! Students are [`User`]s with [`UserRole::Student`]; there is no separate
//! student table.

pub use lessonhub_models::users::{UpdateUserDto, User, UserRole};
