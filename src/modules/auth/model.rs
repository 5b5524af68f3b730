//! Authentication request/response types, re-exported from `lessonhub-models`.

pub use lessonhub_models::auth::*;
pub use lessonhub_models::users::{RegisterRequest, User, UserRole};
