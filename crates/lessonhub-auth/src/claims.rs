use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use lessonhub_models::{UserId, UserRole};

/// JWT claims for access tokens.
///
/// Everything the access-control layer needs is carried in the token, so
/// no database lookup happens per request. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub user_id: UserId,
    pub role: UserRole,
    pub name: String,
    /// Issued at
    pub iat: i64,
    /// Not before
    pub nbf: i64,
    /// Expiration
    pub exp: i64,
}
